//! Core types for the tickroll price simulator.
//!
//! This crate provides the fundamental data structures used throughout tickroll:
//!
//! - [`Granularity`] - Rollup level (minute, fifteen minutes, hour, day)
//! - [`Sample`] - Average/max/min summary for one completed window
//! - [`Instrument`] - Simulated instrument with its mutable current price
//! - [`Group`] - Named, ordered set of instrument ids

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod granularity;
mod instrument;
mod sample;

pub use error::{Result, TickrollError};
pub use granularity::{Granularity, GranularityParseError};
pub use instrument::{Group, GroupMember, Instrument};
pub use sample::Sample;
