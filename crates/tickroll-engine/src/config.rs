//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::RandomWalk;

/// Errors produced while loading or validating an [`EngineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The tick period is zero.
    #[error("tick period must be at least 1 ms")]
    ZeroPeriod,

    /// The delta half-width is negative or not finite.
    #[error("max delta must be a finite, non-negative number (got {0})")]
    InvalidDelta(f64),

    /// The retention cap is zero.
    #[error("retention cap must be at least 1")]
    ZeroRetention,

    /// Failed to read the config file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the config file.
    #[error("Failed to parse config file '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Tunables for the tick generator, rollup engine and scheduler.
///
/// Missing JSON fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scheduler period in milliseconds.
    pub tick_period_ms: u64,
    /// Half-width of the uniform per-tick delta range.
    pub max_delta: f64,
    /// Entries kept per granularity at each day boundary.
    pub retention_cap: usize,
    /// RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
}

impl EngineConfig {
    /// Default scheduler period.
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 10;

    /// Default retention cap per granularity.
    pub const DEFAULT_RETENTION_CAP: usize = 300;

    /// Loads a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// loaded values are invalid.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if !self.max_delta.is_finite() || self.max_delta < 0.0 {
            return Err(ConfigError::InvalidDelta(self.max_delta));
        }
        if self.retention_cap == 0 {
            return Err(ConfigError::ZeroRetention);
        }
        Ok(())
    }

    /// Returns the scheduler period.
    #[must_use]
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Builds the random walk described by this config.
    #[must_use]
    pub fn random_walk(&self) -> RandomWalk {
        match self.seed {
            Some(seed) => RandomWalk::seeded(self.max_delta, seed),
            None => RandomWalk::new(self.max_delta),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: Self::DEFAULT_TICK_PERIOD_MS,
            max_delta: RandomWalk::DEFAULT_MAX_DELTA,
            retention_cap: Self::DEFAULT_RETENTION_CAP,
            seed: None,
            max_ticks: None,
        }
    }
}
