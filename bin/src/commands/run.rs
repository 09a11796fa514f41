//! Run command implementation.
//!
//! Builds the engine from the seeded catalog and drives it until Ctrl-C or
//! the tick limit, showing progress on stderr.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tickroll_lib::prelude::*;

use crate::display::{bar_style, open_store, spinner_style};

/// Flags accepted by `tickroll run`.
pub(crate) struct RunArgs {
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) period_ms: Option<u64>,
    pub(crate) max_delta: Option<f64>,
    pub(crate) retention_cap: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) ticks: Option<u64>,
    pub(crate) resume: bool,
}

impl RunArgs {
    /// Loads the config file if given, then applies flag overrides.
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => EngineConfig::default(),
        };

        if let Some(period_ms) = self.period_ms {
            config.tick_period_ms = period_ms;
        }
        if let Some(max_delta) = self.max_delta {
            config.max_delta = max_delta;
        }
        if let Some(retention_cap) = self.retention_cap {
            config.retention_cap = retention_cap;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.ticks.is_some() {
            config.max_ticks = self.ticks;
        }

        config.validate().context("Invalid engine configuration")?;
        Ok(config)
    }
}

/// Resolves when Ctrl-C is received.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Run the tick generator and rollup engine.
pub(crate) async fn run(args: RunArgs, quiet: bool) -> Result<()> {
    let config = args.engine_config()?;
    let store = open_store(args.data_dir.clone())?;
    let catalog = Arc::new(Catalog::seeded());
    let engine = RollupEngine::from_config(catalog, store, &config);

    if args.resume {
        let restored = engine
            .restore_prices()
            .context("Failed to restore prices from sample logs")?;
        tracing::info!(restored, "restored prices");
        if !quiet {
            println!("Restored {restored} prices from existing logs");
        }
    }

    if !quiet {
        println!(
            "Simulating {} instruments every {} ms, writing to {}",
            engine.catalog().len(),
            config.tick_period_ms,
            engine.store().root().display()
        );
    }

    let progress = match config.max_ticks {
        _ if quiet => ProgressBar::hidden(),
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(bar_style("ticks")?);
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(spinner_style()?);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        }
    };

    let mut scheduler = Scheduler::from_config(engine, &config);
    let mut samples = 0u64;
    let summary = scheduler
        .run_with(ctrl_c(), |report: &TickReport| {
            progress.inc(1);
            if report.samples_written > 0 {
                samples += report.samples_written as u64;
                progress.set_message(format!("{samples} samples"));
            }
        })
        .await
        .context("Tick loop stopped on a store error")?;

    progress.finish_with_message(format!("{} samples written", summary.samples_written));

    if !quiet {
        let elapsed = summary.finished_at - summary.started_at;
        println!(
            "Started: {}",
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("Ticks:   {}", summary.ticks);
        println!("Samples: {}", summary.samples_written);
        println!("Trims:   {}", summary.trims);
        println!(
            "Elapsed: {:.1}s",
            elapsed.num_milliseconds() as f64 / 1000.0
        );
    }

    Ok(())
}
