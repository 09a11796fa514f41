//! Manual retention pass over every sample log.

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use inquire::Confirm;
use std::path::PathBuf;

use crate::display::{bar_style, open_store};

/// Bound every log in the store to its newest `cap` entries per granularity.
pub(crate) fn trim(cap: usize, data_dir: Option<PathBuf>, yes: bool, quiet: bool) -> Result<()> {
    if cap == 0 {
        bail!("--cap must be at least 1");
    }

    let store = open_store(data_dir)?;
    let ids = store
        .instrument_ids()
        .context("Failed to list sample logs")?;

    if ids.is_empty() {
        println!("No sample logs in {}.", store.root().display());
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new(&format!(
            "Trim {} logs in {} to {cap} entries per granularity?",
            ids.len(),
            store.root().display()
        ))
        .with_default(false)
        .prompt()
        .context("Confirmation cancelled")?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(ids.len() as u64);
        pb.set_style(bar_style("logs")?);
        pb
    };

    let mut rewritten = 0usize;
    let mut removed = 0usize;
    for id in &ids {
        progress.set_message(id.clone());
        let outcome = store
            .trim(id, cap)
            .with_context(|| format!("Failed to trim log for {id}"))?;
        if outcome.rewrote() {
            rewritten += 1;
            removed += outcome.removed;
        }
        progress.inc(1);
    }
    progress.finish_with_message(format!("{rewritten} logs rewritten"));

    if !quiet {
        println!("Removed {removed} entries from {rewritten} of {} logs", ids.len());
    }
    Ok(())
}
