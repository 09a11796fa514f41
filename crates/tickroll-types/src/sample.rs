//! Summary statistics for one completed window.

use serde::{Deserialize, Serialize};

use crate::Granularity;

/// Average/max/min summary of one completed window for one instrument.
///
/// Samples are immutable once written to a log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Rollup level this sample belongs to.
    pub granularity: Granularity,
    /// Mean price over the window.
    pub average: f64,
    /// Highest price over the window.
    pub max: f64,
    /// Lowest price over the window.
    pub min: f64,
}

impl Sample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(granularity: Granularity, average: f64, max: f64, min: f64) -> Self {
        Self {
            granularity,
            average,
            max,
            min,
        }
    }

    /// Returns the all-zero sample used for windows with no observations.
    #[must_use]
    pub const fn zero(granularity: Granularity) -> Self {
        Self::new(granularity, 0.0, 0.0, 0.0)
    }

    /// Returns true if every statistic is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.average == 0.0 && self.max == 0.0 && self.min == 0.0
    }
}
