//! History command implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tickroll_lib::prelude::*;

use crate::display::{open_store, print_samples};

/// Print the newest `count` samples of one granularity for an instrument.
pub(crate) fn show_history(
    ticker: &str,
    granularity: &str,
    count: usize,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let granularity: Granularity = granularity.parse()?;
    let catalog = Catalog::seeded();
    let instrument = catalog
        .require(ticker)
        .with_context(|| format!("Unknown instrument: {ticker}"))?;
    let store = open_store(data_dir)?;

    let samples = store
        .read_recent(instrument.id(), granularity, count)
        .with_context(|| format!("Failed to read samples for {}", instrument.id()))?;

    if samples.is_empty() {
        println!("No {granularity} samples for {}.", instrument.id());
        return Ok(());
    }

    print_samples(&samples);
    println!("\nShowing {} of the newest {granularity} samples", samples.len());
    Ok(())
}
