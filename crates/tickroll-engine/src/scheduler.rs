//! Fixed-period tick driver.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use tickroll_store::Result;

use crate::{EngineConfig, PriceWalk, RandomWalk, RollupEngine, TickReport};

/// Totals for one [`Scheduler::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Samples appended.
    pub samples_written: u64,
    /// Logs rewritten by retention trimming.
    pub trims: u64,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run stopped.
    pub finished_at: DateTime<Utc>,
}

/// Drives a [`RollupEngine`] at a fixed period.
///
/// All ticks run on the task that awaits [`run`](Self::run), and the next
/// timer firing is not awaited until the previous tick has returned, so ticks
/// never overlap. A tick that overruns the period delays the following one
/// instead of triggering a catch-up burst.
#[derive(Debug)]
pub struct Scheduler<W = RandomWalk> {
    engine: RollupEngine<W>,
    period: Duration,
    max_ticks: Option<u64>,
}

impl<W: PriceWalk> Scheduler<W> {
    /// Creates a scheduler with the given period and no tick limit.
    #[must_use]
    pub const fn new(engine: RollupEngine<W>, period: Duration) -> Self {
        Self {
            engine,
            period,
            max_ticks: None,
        }
    }

    /// Creates a scheduler using the period and tick limit from `config`.
    #[must_use]
    pub const fn from_config(engine: RollupEngine<W>, config: &EngineConfig) -> Self {
        Self {
            engine,
            period: config.tick_period(),
            max_ticks: config.max_ticks,
        }
    }

    /// Stops the run after `max_ticks` ticks.
    #[must_use]
    pub const fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Returns the scheduler period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns the engine.
    #[must_use]
    pub const fn engine(&self) -> &RollupEngine<W> {
        &self.engine
    }

    /// Consumes the scheduler, returning the engine.
    #[must_use]
    pub fn into_engine(self) -> RollupEngine<W> {
        self.engine
    }

    /// Runs until `shutdown` resolves or the tick limit is reached.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first store error.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<RunSummary>
    where
        F: Future<Output = ()>,
    {
        self.run_with(shutdown, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_tick` after every tick.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first store error.
    pub async fn run_with<F, O>(&mut self, shutdown: F, mut on_tick: O) -> Result<RunSummary>
    where
        F: Future<Output = ()>,
        O: FnMut(&TickReport),
    {
        let started_at = Utc::now();
        let mut ticks = 0u64;
        let mut samples_written = 0u64;
        let mut trims = 0u64;

        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            period_ms = self.period.as_millis() as u64,
            max_ticks = ?self.max_ticks,
            instruments = self.engine.catalog().len(),
            "scheduler started"
        );

        loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!(ticks, "shutdown requested");
                    break;
                }
                _ = timer.tick() => {}
            }

            let report = self.engine.tick()?;
            ticks += 1;
            samples_written += report.samples_written as u64;
            trims += report.trimmed as u64;
            on_tick(&report);
        }

        let summary = RunSummary {
            ticks,
            samples_written,
            trims,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(
            ticks = summary.ticks,
            samples = summary.samples_written,
            trims = summary.trims,
            clock = self.engine.clock(),
            "scheduler stopped"
        );
        Ok(summary)
    }
}
