//! List command implementation.
//!
//! This module handles listing the seeded instruments with optional filtering.

use anyhow::Result;
use tickroll_lib::prelude::*;

/// List instruments, optionally limited to one group and/or a ticker substring.
pub(crate) fn list_instruments(group: Option<&str>, search: Option<&str>) -> Result<()> {
    let catalog = Catalog::seeded();

    let mut ids = match group {
        Some(name) => catalog.group_members(name)?,
        None => catalog.ids(),
    };
    if let Some(pattern) = search {
        let matches = catalog.search(pattern);
        ids.retain(|id| matches.contains(id));
    }

    if ids.is_empty() {
        println!("No instruments found.");
        return Ok(());
    }

    println!("{:<10} {:<10} {:>12}", "TICKER", "GROUP", "ORIGIN");
    println!("{}", "-".repeat(34));

    for id in &ids {
        let Some(instrument) = catalog.get(id) else {
            continue;
        };
        println!(
            "{:<10} {:<10} {:>12.2}",
            instrument.id(),
            catalog.group_of(id).unwrap_or("-"),
            instrument.origin_price()
        );
    }

    println!("\nTotal: {} instruments", ids.len());
    Ok(())
}
