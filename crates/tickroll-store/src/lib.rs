//! Append-only sample logs for the tickroll rollup engine.
//!
//! Every instrument owns one human-readable log file. Each line holds one
//! [`Sample`](tickroll_types::Sample) tagged with its granularity:
//!
//! ```text
//! MINUTE: Average=751.525, Max=753.0, Min=750.05
//! ```
//!
//! - [`SampleStore`] - Append, read-back and retention trimming
//! - [`encode_line`] / [`parse_line`] - The line codec

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod store;

pub use codec::{SampleParseError, encode_line, parse_line};
pub use store::{Result, SampleStore, StoreError, TrimOutcome};
