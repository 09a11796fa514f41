//! Shared output helpers for the tickroll CLI.

use anyhow::{Context, Result};
use indicatif::ProgressStyle;
use std::path::PathBuf;
use tickroll_lib::prelude::*;

/// Opens the sample store at `data_dir`, or at the per-user default location.
pub(crate) fn open_store(data_dir: Option<PathBuf>) -> Result<SampleStore> {
    let root = data_dir.unwrap_or_else(SampleStore::default_path);
    SampleStore::new(root.clone())
        .with_context(|| format!("Failed to open sample store at {}", root.display()))
}

/// Bar style for runs with a known length.
pub(crate) fn bar_style(unit: &str) -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} ({{percent}}%) {{msg}}"
        ))
        .context("Invalid progress template")?
        .progress_chars("=>-"))
}

/// Spinner style for open-ended runs.
pub(crate) fn spinner_style() -> Result<ProgressStyle> {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} ticks {msg}")
        .context("Invalid progress template")
}

/// Prints samples as a table, oldest first.
pub(crate) fn print_samples(samples: &[Sample]) {
    println!(
        "{:<16} {:>14} {:>14} {:>14}",
        "GRANULARITY", "AVERAGE", "MAX", "MIN"
    );
    println!("{}", "-".repeat(61));

    for sample in samples {
        println!(
            "{:<16} {:>14.4} {:>14.4} {:>14.4}",
            sample.granularity, sample.average, sample.max, sample.min
        );
    }
}
