//! The rollup state machine.

use std::collections::VecDeque;
use std::sync::Arc;

use tickroll_catalog::Catalog;
use tickroll_store::{Result, SampleStore};
use tickroll_types::{Granularity, Sample};

use crate::window::{roll_up, summarize};
use crate::{EngineConfig, PriceWalk, RandomWalk};

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Clock value after advancing.
    pub clock: u64,
    /// Granularities whose boundary was crossed, finest first.
    pub fired: Vec<Granularity>,
    /// Samples appended across all instruments.
    pub samples_written: usize,
    /// Logs that lost entries to retention trimming.
    pub trimmed: usize,
}

/// Drives prices forward and rolls observations up into coarser samples.
///
/// The engine is the only writer of instrument prices and sample logs.
/// Readers share the [`Catalog`] through an `Arc` and may clone the
/// [`SampleStore`] handle.
///
/// On every [`tick`](Self::tick):
///
/// 1. The clock advances by one.
/// 2. Each instrument's price moves by one delta from the [`PriceWalk`] and
///    the new price joins the instrument's minute observation window.
/// 3. For each granularity whose boundary the clock now sits on, finest
///    first, one sample is computed and appended. A coarser rollup therefore
///    sees the finer sample written earlier in the same tick.
/// 4. On a day boundary each instrument's log is trimmed right after its
///    day sample is written.
#[derive(Debug)]
pub struct RollupEngine<W = RandomWalk> {
    catalog: Arc<Catalog>,
    store: SampleStore,
    walk: W,
    clock: u64,
    /// Recent raw prices, parallel to `catalog.all()`.
    observations: Vec<VecDeque<f64>>,
    retention_cap: usize,
}

impl RollupEngine<RandomWalk> {
    /// Creates an engine using the random walk and retention cap from `config`.
    #[must_use]
    pub fn from_config(catalog: Arc<Catalog>, store: SampleStore, config: &EngineConfig) -> Self {
        Self::new(catalog, store, config.random_walk())
            .with_retention_cap(config.retention_cap)
    }
}

impl<W: PriceWalk> RollupEngine<W> {
    /// Creates an engine with the clock at zero and empty windows.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, store: SampleStore, walk: W) -> Self {
        let window = Granularity::Minute.fan_in();
        let observations = catalog
            .all()
            .map(|_| VecDeque::with_capacity(window))
            .collect();

        Self {
            catalog,
            store,
            walk,
            clock: 0,
            observations,
            retention_cap: EngineConfig::DEFAULT_RETENTION_CAP,
        }
    }

    /// Sets how many entries per granularity survive a day boundary.
    #[must_use]
    pub const fn with_retention_cap(mut self, retention_cap: usize) -> Self {
        self.retention_cap = retention_cap;
        self
    }

    /// Returns the logical clock.
    #[must_use]
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Returns the shared catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Returns the sample store.
    #[must_use]
    pub const fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Returns the raw prices currently in an instrument's minute window.
    #[must_use]
    pub fn observations(&self, instrument_id: &str) -> Option<&VecDeque<f64>> {
        self.position(instrument_id).map(|i| &self.observations[i])
    }

    /// Sets each instrument's current price to the average of the last
    /// sample in its log, if it has one.
    ///
    /// Returns how many instruments were restored.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing log cannot be read.
    pub fn restore_prices(&self) -> Result<usize> {
        let mut restored = 0;
        for instrument in self.catalog.all() {
            if let Some(price) = self.store.last_average(instrument.id())? {
                instrument.set_current_price(price);
                restored += 1;
                tracing::debug!(instrument = instrument.id(), price, "restored price");
            }
        }
        Ok(restored)
    }

    /// Computes (without appending) the sample `granularity` would produce
    /// for an instrument right now.
    ///
    /// Minute samples come from the in-memory observation window; coarser
    /// ones from the store. Unknown instruments and empty windows yield
    /// [`Sample::zero`].
    ///
    /// # Errors
    ///
    /// Returns an error if an existing log cannot be read.
    pub fn rollup(&self, instrument_id: &str, granularity: Granularity) -> Result<Sample> {
        let (Some(instrument), Some(window)) = (
            self.catalog.get(instrument_id),
            self.observations(instrument_id),
        ) else {
            return Ok(Sample::zero(granularity));
        };
        compute(&self.store, instrument.id(), window, granularity)
    }

    /// Runs one scheduler tick.
    ///
    /// # Errors
    ///
    /// Returns the first store error. Instruments after the failing one are
    /// not processed in this tick.
    pub fn tick(&mut self) -> Result<TickReport> {
        self.clock += 1;
        let clock = self.clock;
        let fired: Vec<Granularity> = Granularity::all()
            .iter()
            .copied()
            .filter(|g| g.is_boundary(clock))
            .collect();
        let day_boundary = fired.contains(&Granularity::Day);
        let window_len = Granularity::Minute.fan_in();

        let mut samples_written = 0;
        let mut trimmed = 0;

        for (instrument, window) in self.catalog.all().zip(self.observations.iter_mut()) {
            let price = instrument.apply_delta(self.walk.next_delta());
            if window.len() == window_len {
                window.pop_front();
            }
            window.push_back(price);

            for &granularity in &fired {
                let sample = compute(&self.store, instrument.id(), window, granularity)?;
                self.store.append(instrument.id(), &sample)?;
                samples_written += 1;
                tracing::debug!(
                    instrument = instrument.id(),
                    clock,
                    %granularity,
                    average = sample.average,
                    max = sample.max,
                    min = sample.min,
                    "rolled up sample"
                );
            }

            if day_boundary {
                let outcome = self.store.trim(instrument.id(), self.retention_cap)?;
                if outcome.rewrote() {
                    trimmed += 1;
                }
            }
        }

        if day_boundary {
            tracing::info!(clock, trimmed, cap = self.retention_cap, "day boundary reached");
        }

        Ok(TickReport {
            clock,
            fired,
            samples_written,
            trimmed,
        })
    }

    /// Runs `n` ticks back to back and returns the last report.
    ///
    /// # Errors
    ///
    /// Returns the first store error.
    pub fn advance(&mut self, n: u64) -> Result<Option<TickReport>> {
        let mut last = None;
        for _ in 0..n {
            last = Some(self.tick()?);
        }
        Ok(last)
    }

    fn position(&self, instrument_id: &str) -> Option<usize> {
        let instrument = self.catalog.get(instrument_id)?;
        self.catalog
            .all()
            .position(|i| std::ptr::eq(i, instrument))
    }
}

/// Computes one sample of `granularity` for an instrument.
fn compute(
    store: &SampleStore,
    instrument_id: &str,
    window: &VecDeque<f64>,
    granularity: Granularity,
) -> Result<Sample> {
    match granularity.source() {
        None => Ok(summarize(granularity, window)),
        Some(source) => {
            let samples = store.read_recent(instrument_id, source, granularity.fan_in())?;
            Ok(roll_up(granularity, &samples))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedWalk;
    use approx::assert_relative_eq;
    use tempfile::TempDir;
    use tickroll_types::Group;

    fn engine(walk: FixedWalk) -> (TempDir, RollupEngine<FixedWalk>) {
        let temp_dir = TempDir::new().unwrap();
        let store = SampleStore::new(temp_dir.path().to_path_buf()).unwrap();
        let catalog = Catalog::from_groups(vec![Group::new(
            "C25",
            [("NOVO", 750.0), ("ORSTED", 15.0)],
        )])
        .unwrap();
        (temp_dir, RollupEngine::new(Arc::new(catalog), store, walk))
    }

    #[test]
    fn test_tick_advances_clock_and_prices() {
        let (_temp_dir, mut engine) = engine(FixedWalk::constant(0.5));
        let report = engine.tick().unwrap();

        assert_eq!(report.clock, 1);
        assert!(report.fired.is_empty());
        assert_eq!(report.samples_written, 0);
        assert_eq!(engine.clock(), 1);
        assert_relative_eq!(engine.catalog().get("NOVO").unwrap().current_price(), 750.5);
        assert_relative_eq!(engine.catalog().get("ORSTED").unwrap().current_price(), 15.5);
    }

    #[test]
    fn test_observation_window_is_bounded() {
        let (_temp_dir, mut engine) = engine(FixedWalk::constant(1.0));
        engine.advance(75).unwrap();

        let window = engine.observations("NOVO").unwrap();
        assert_eq!(window.len(), 60);
        assert_relative_eq!(*window.front().unwrap(), 766.0);
        assert_relative_eq!(*window.back().unwrap(), 825.0);
    }

    #[test]
    fn test_minute_boundary_writes_one_sample_per_instrument() {
        let (_temp_dir, mut engine) = engine(FixedWalk::constant(0.0));
        let report = engine.advance(60).unwrap().unwrap();

        assert_eq!(report.fired, vec![Granularity::Minute]);
        assert_eq!(report.samples_written, 2);

        let minutes = engine.store().read_all("ORSTED", Granularity::Minute).unwrap();
        assert_eq!(minutes.len(), 1);
        assert_relative_eq!(minutes[0].average, 15.0);
    }

    #[test]
    fn test_fifteen_minute_boundary_fires_both_levels() {
        let (_temp_dir, mut engine) = engine(FixedWalk::constant(0.0));
        let report = engine.advance(900).unwrap().unwrap();

        assert_eq!(
            report.fired,
            vec![Granularity::Minute, Granularity::FifteenMinutes]
        );
        assert_eq!(report.samples_written, 4);
    }

    #[test]
    fn test_rollup_unknown_instrument_is_zero() {
        let (_temp_dir, engine) = engine(FixedWalk::constant(0.0));
        // A log left behind for an instrument the catalog does not know.
        engine
            .store()
            .append("TSLA", &Sample::new(Granularity::FifteenMinutes, 240.0, 241.0, 239.0))
            .unwrap();

        for granularity in Granularity::all() {
            let sample = engine.rollup("TSLA", *granularity).unwrap();
            assert_eq!(sample.granularity, *granularity);
            assert!(sample.is_zero(), "{granularity} should be zero");
        }
    }

    #[test]
    fn test_rollup_reads_store_for_coarser_levels() {
        let (_temp_dir, engine) = engine(FixedWalk::constant(0.0));
        for (average, max, min) in [(10.0, 12.0, 9.0), (20.0, 22.0, 18.0), (30.0, 35.0, 29.0)] {
            engine
                .store()
                .append("NOVO", &Sample::new(Granularity::Minute, average, max, min))
                .unwrap();
        }

        let sample = engine.rollup("NOVO", Granularity::FifteenMinutes).unwrap();
        assert_eq!(sample.granularity, Granularity::FifteenMinutes);
        assert_relative_eq!(sample.average, 20.0);
        assert_relative_eq!(sample.max, 35.0);
        assert_relative_eq!(sample.min, 9.0);
    }

    #[test]
    fn test_restore_prices() {
        let (_temp_dir, engine) = engine(FixedWalk::constant(0.0));
        engine
            .store()
            .append("NOVO", &Sample::new(Granularity::Hour, 812.5, 820.0, 800.0))
            .unwrap();

        assert_eq!(engine.restore_prices().unwrap(), 1);
        assert_relative_eq!(engine.catalog().get("NOVO").unwrap().current_price(), 812.5);
        assert_relative_eq!(engine.catalog().get("ORSTED").unwrap().current_price(), 15.0);
        assert_eq!(engine.clock(), 0);
    }
}
