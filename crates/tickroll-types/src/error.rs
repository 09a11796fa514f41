//! Error types for tickroll.

use thiserror::Error;

/// Result type alias for tickroll catalog operations.
pub type Result<T> = std::result::Result<T, TickrollError>;

/// Errors that can occur when looking up or bootstrapping instruments.
#[derive(Error, Debug)]
pub enum TickrollError {
    /// Instrument not found.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Group not found.
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// The same instrument id appears twice in the seed data.
    #[error("Duplicate instrument: {0}")]
    DuplicateInstrument(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
