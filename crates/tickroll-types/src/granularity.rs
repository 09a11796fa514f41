//! Rollup granularity definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A rollup level.
///
/// Each granularity is produced by reducing a fixed number of samples of the
/// next finer level. [`Granularity::Minute`] is the finest persisted level and
/// is built directly from raw per-tick price observations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    /// One minute (60 ticks).
    #[default]
    Minute,
    /// Fifteen minutes (900 ticks).
    FifteenMinutes,
    /// One hour (3600 ticks).
    Hour,
    /// One day (86400 ticks).
    Day,
}

impl Granularity {
    /// Number of scheduler ticks that make up one minute.
    pub const TICKS_PER_MINUTE: u64 = 60;

    /// Returns the boundary period in scheduler ticks.
    ///
    /// A rollup for this granularity fires on every tick where
    /// `clock % period == 0`.
    #[must_use]
    pub const fn period_ticks(&self) -> u64 {
        match self {
            Self::Minute => Self::TICKS_PER_MINUTE,
            Self::FifteenMinutes => 15 * Self::TICKS_PER_MINUTE,
            Self::Hour => 60 * Self::TICKS_PER_MINUTE,
            Self::Day => 24 * 60 * Self::TICKS_PER_MINUTE,
        }
    }

    /// Returns the finer granularity this level is rolled up from, or `None`
    /// for [`Granularity::Minute`], which is built from raw observations.
    #[must_use]
    pub const fn source(&self) -> Option<Self> {
        match self {
            Self::Minute => None,
            Self::FifteenMinutes => Some(Self::Minute),
            Self::Hour => Some(Self::FifteenMinutes),
            Self::Day => Some(Self::Hour),
        }
    }

    /// Returns how many source entries one sample of this level reduces.
    ///
    /// For [`Granularity::Minute`] this is the number of raw observations.
    #[must_use]
    pub const fn fan_in(&self) -> usize {
        match self {
            Self::Minute => Self::TICKS_PER_MINUTE as usize,
            Self::FifteenMinutes => 15,
            Self::Hour => 4,
            Self::Day => 24,
        }
    }

    /// Returns true if a rollup for this granularity fires at `clock`.
    ///
    /// Clock value zero never fires.
    #[must_use]
    pub const fn is_boundary(&self, clock: u64) -> bool {
        clock != 0 && clock % self.period_ticks() == 0
    }

    /// Returns the tag written at the start of each persisted line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "MINUTE",
            Self::FifteenMinutes => "FIFTEEN_MINUTES",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
        }
    }

    /// Parses the exact tag written at the start of a persisted line.
    ///
    /// Unlike [`FromStr`], no aliases or case folding are accepted.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|g| g.as_str() == tag)
    }

    /// Returns all granularities, finest first.
    ///
    /// This is also the order in which rollups execute within one tick.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minute, Self::FifteenMinutes, Self::Hour, Self::Day]
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = GranularityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" | "m1" | "1m" => Ok(Self::Minute),
            "fifteen_minutes" | "m15" | "15m" => Ok(Self::FifteenMinutes),
            "hour" | "h1" | "1h" => Ok(Self::Hour),
            "day" | "d1" | "1d" | "daily" => Ok(Self::Day),
            _ => Err(GranularityParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid granularity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranularityParseError(String);

impl std::fmt::Display for GranularityParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid granularity '{}', expected one of: MINUTE, FIFTEEN_MINUTES, HOUR, DAY (or m1, m15, h1, d1)",
            self.0
        )
    }
}

impl std::error::Error for GranularityParseError {}
