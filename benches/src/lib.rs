//! Benchmark fixtures for tickroll.

use std::sync::Arc;
use tempfile::TempDir;
use tickroll_lib::{Catalog, Granularity, RandomWalk, RollupEngine, Sample, SampleStore};

/// Seed used by every benchmark walk.
pub const BENCH_SEED: u64 = 42;

/// An engine over the seeded catalog writing into a private temp directory.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct EngineFixture {
    /// Keeps the store directory alive.
    pub temp_dir: TempDir,
    /// The engine under test.
    pub engine: RollupEngine<RandomWalk>,
}

impl EngineFixture {
    /// Creates a fresh engine at clock 0.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SampleStore::new(temp_dir.path().join("tickers"))
            .expect("Failed to create sample store");
        let engine = RollupEngine::new(
            Arc::new(Catalog::seeded()),
            store,
            RandomWalk::seeded(RandomWalk::DEFAULT_MAX_DELTA, BENCH_SEED),
        );
        Self { temp_dir, engine }
    }
}

impl Default for EngineFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `per_granularity` samples of every granularity into `id`'s log.
///
/// # Panics
///
/// Panics if the log cannot be written.
pub fn fill_log(store: &SampleStore, id: &str, per_granularity: usize) {
    for i in 0..per_granularity {
        let price = 100.0 + i as f64 * 0.01;
        for granularity in Granularity::all() {
            store
                .append(id, &Sample::new(*granularity, price, price + 0.5, price - 0.5))
                .expect("Failed to append sample");
        }
    }
}
