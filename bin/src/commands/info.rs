//! Info command implementation.
//!
//! Shows catalog details for one instrument plus what its sample log holds.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tickroll_lib::prelude::*;

use crate::display::open_store;

/// Show details about an instrument, including stored sample counts.
pub(crate) fn show_info(ticker: &str, data_dir: Option<PathBuf>) -> Result<()> {
    let catalog = Catalog::seeded();
    let instrument = catalog
        .require(ticker)
        .with_context(|| format!("Unknown instrument: {ticker}"))?;
    let store = open_store(data_dir)?;
    let id = instrument.id();

    println!("Ticker:       {id}");
    println!("Group:        {}", catalog.group_of(id).unwrap_or("-"));
    println!("Origin Price: {:.2}", instrument.origin_price());
    println!("Log:          {}", store.log_path(id).display());

    let last_average = store
        .last_average(id)?
        .map_or_else(|| "N/A".to_string(), |average| format!("{average:.4}"));
    println!("Last Average: {last_average}");

    let counts = store.counts(id)?;
    println!("\nStored Samples:");
    println!("{:<16} {:>8}", "GRANULARITY", "COUNT");
    println!("{}", "-".repeat(25));
    for granularity in Granularity::all() {
        println!(
            "{:<16} {:>8}",
            granularity,
            counts.get(granularity).copied().unwrap_or(0)
        );
    }

    Ok(())
}
