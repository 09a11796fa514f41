//! Price tick simulator with minute/hour/day rollups.
//!
//! This is a facade crate that re-exports functionality from the tickroll
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tickroll_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Arc::new(Catalog::seeded());
//!     let store = SampleStore::with_default_path()?;
//!     let config = EngineConfig {
//!         max_ticks: Some(3_600),
//!         ..Default::default()
//!     };
//!
//!     let engine = RollupEngine::from_config(catalog, store, &config);
//!     let mut scheduler = Scheduler::from_config(engine, &config);
//!     let summary = scheduler.run(std::future::pending()).await?;
//!
//!     println!("{} samples written", summary.samples_written);
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickroll_types::*;

// Re-export the catalog
pub use tickroll_catalog::Catalog;

// Re-export the sample store
pub use tickroll_store::{SampleParseError, SampleStore, StoreError, TrimOutcome, encode_line, parse_line};

// Re-export the engine
#[cfg(feature = "engine")]
pub use tickroll_engine::{
    ConfigError, EngineConfig, FixedWalk, PriceWalk, RandomWalk, RollupEngine, RunSummary,
    Scheduler, TickReport, WindowStats, roll_up, summarize,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickroll_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickroll_types::{Granularity, Group, Instrument, Sample, TickrollError};

    pub use tickroll_catalog::Catalog;

    pub use tickroll_store::{SampleStore, StoreError, TrimOutcome};

    #[cfg(feature = "engine")]
    pub use tickroll_engine::{
        EngineConfig, PriceWalk, RandomWalk, RollupEngine, RunSummary, Scheduler, TickReport,
    };
}
