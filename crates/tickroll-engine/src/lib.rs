//! Tick generation and rollups for the tickroll price simulator.
//!
//! Each scheduler tick moves every instrument's price by a small random
//! delta and advances one logical clock. When the clock crosses a
//! [`Granularity`](tickroll_types::Granularity) boundary the engine reduces
//! recent samples of the finer level into one sample of the coarser level
//! and appends it to the instrument's log:
//!
//! - [`PriceWalk`] / [`RandomWalk`] / [`FixedWalk`] - Per-tick price deltas
//! - [`RollupEngine`] - Clock, observation windows and boundary rollups
//! - [`Scheduler`] - Fixed-period, non-overlapping tick driver
//! - [`EngineConfig`] - Tunables loaded from JSON or CLI flags

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod scheduler;
mod walk;
mod window;

pub use config::{ConfigError, EngineConfig};
pub use engine::{RollupEngine, TickReport};
pub use scheduler::{RunSummary, Scheduler};
pub use walk::{FixedWalk, PriceWalk, RandomWalk};
pub use window::{WindowStats, roll_up, summarize};
