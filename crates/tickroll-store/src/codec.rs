//! Line codec for persisted samples.
//!
//! Format (one sample per line, fields in this order):
//!
//! ```text
//! <TAG>: Average=<f64>, Max=<f64>, Min=<f64>
//! ```
//!
//! Numbers use the shortest representation that round-trips, always with a
//! fractional part or exponent. Exponents written as `E` are accepted on read.

use thiserror::Error;
use tickroll_types::{Granularity, Sample};

const AVERAGE: &str = "Average=";
const MAX: &str = "Max=";
const MIN: &str = "Min=";

/// Errors produced when a log line cannot be decoded.
///
/// Readers skip such lines; they are never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleParseError {
    /// The line has no `<TAG>:` prefix.
    #[error("missing granularity tag")]
    MissingTag,

    /// The tag is not a known granularity.
    #[error("unknown granularity tag '{0}'")]
    UnknownGranularity(String),

    /// A required field token is absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// A field value is not a float.
    #[error("invalid number '{value}' for field '{field}'")]
    InvalidNumber {
        /// The field token.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },
}

/// Encodes a sample as one newline-terminated log line.
#[must_use]
pub fn encode_line(sample: &Sample) -> String {
    format!(
        "{}: {AVERAGE}{:?}, {MAX}{:?}, {MIN}{:?}\n",
        sample.granularity, sample.average, sample.max, sample.min
    )
}

/// Decodes one log line (with or without its trailing newline).
///
/// # Errors
///
/// Returns a [`SampleParseError`] describing the first problem found.
pub fn parse_line(line: &str) -> Result<Sample, SampleParseError> {
    let (tag, body) = line.split_once(':').ok_or(SampleParseError::MissingTag)?;
    let tag = tag.trim();
    let granularity = Granularity::from_tag(tag)
        .ok_or_else(|| SampleParseError::UnknownGranularity(tag.to_string()))?;

    Ok(Sample::new(
        granularity,
        field(body, AVERAGE)?,
        field(body, MAX)?,
        field(body, MIN)?,
    ))
}

/// Returns the tag prefix of a raw line, if any.
pub(crate) fn tag_of(line: &str) -> Option<&str> {
    line.split_once(':').map(|(tag, _)| tag.trim())
}

/// Extracts the value following `token`, up to the next `,` or end of line.
fn field(body: &str, token: &'static str) -> Result<f64, SampleParseError> {
    let (_, rest) = body
        .split_once(token)
        .ok_or(SampleParseError::MissingField(token))?;
    let raw = rest.split(',').next().unwrap_or_default().trim();
    raw.parse().map_err(|_| SampleParseError::InvalidNumber {
        field: token,
        value: raw.to_string(),
    })
}
