// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! Every field is optional; the defaults reproduce the harness' built-in
//! search parameters. Any out-of-range value is rejected before a run starts.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BenchError, BenchResult, ConfigValidationError};
use crate::registry::MATCH_ALL;

/// Smallest iteration count tried by the search.
pub const DEFAULT_MIN_ITERATIONS: u64 = 10;
/// Hard cap on the iteration count.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000_000;
/// Minimum measured time for a trial to count.
pub const DEFAULT_MIN_TIME_MS: u64 = 500;
/// Factor by which the next trial aims past the time floor.
pub const DEFAULT_OVERSHOOT: f64 = 2.0;

const MAX_MIN_TIME_MS: u64 = 60_000;

/// Raw runner section as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRunnerConfig {
    #[serde(default = "default_min_iterations")]
    min_iterations: u64,
    #[serde(default = "default_max_iterations")]
    max_iterations: u64,
    #[serde(default = "default_min_time_ms")]
    min_time_ms: u64,
    #[serde(default = "default_overshoot")]
    overshoot: f64,
}

fn default_min_iterations() -> u64 {
    DEFAULT_MIN_ITERATIONS
}

fn default_max_iterations() -> u64 {
    DEFAULT_MAX_ITERATIONS
}

fn default_min_time_ms() -> u64 {
    DEFAULT_MIN_TIME_MS
}

fn default_overshoot() -> f64 {
    DEFAULT_OVERSHOOT
}

impl Default for RawRunnerConfig {
    fn default() -> Self {
        Self {
            min_iterations: default_min_iterations(),
            max_iterations: default_max_iterations(),
            min_time_ms: default_min_time_ms(),
            overshoot: default_overshoot(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    runner: RawRunnerConfig,
    #[serde(default = "default_filter")]
    filter: String,
}

fn default_filter() -> String {
    MATCH_ALL.to_string()
}

/// Validated parameters of the adaptive iteration search.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub min_iterations: u64,
    pub max_iterations: u64,
    pub min_time: Duration,
    pub overshoot: f64,
}

impl RunnerConfig {
    /// Time floor in seconds.
    pub fn min_time_secs(&self) -> f64 {
        self.min_time.as_secs_f64()
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_iterations: DEFAULT_MIN_ITERATIONS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_time: Duration::from_millis(DEFAULT_MIN_TIME_MS),
            overshoot: DEFAULT_OVERSHOOT,
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub runner: RunnerConfig,
    /// Default filter for runs that do not name one.
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            filter: default_filter(),
        }
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn load_string(content: &str) -> BenchResult<Config> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> BenchResult<Config> {
        let runner = Self::validate_runner(raw.runner)?;

        if raw.filter.is_empty() {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "filter",
                value: raw.filter,
                reason: format!("Filter cannot be empty (use '{}')", MATCH_ALL),
            }
            .into());
        }

        Ok(Config {
            runner,
            filter: raw.filter,
        })
    }

    fn validate_runner(raw: RawRunnerConfig) -> BenchResult<RunnerConfig> {
        if raw.min_iterations == 0 {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "min_iterations",
                value: raw.min_iterations.to_string(),
                reason: "Must be at least 1".to_string(),
            }
            .into());
        }

        if raw.max_iterations < raw.min_iterations {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "max_iterations",
                value: raw.max_iterations.to_string(),
                reason: format!(
                    "Must not be below min_iterations ({})",
                    raw.min_iterations
                ),
            }
            .into());
        }

        if raw.min_time_ms == 0 || raw.min_time_ms > MAX_MIN_TIME_MS {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "min_time_ms",
                value: raw.min_time_ms.to_string(),
                reason: format!("Must be between 1 and {} ms", MAX_MIN_TIME_MS),
            }
            .into());
        }

        if !raw.overshoot.is_finite() || raw.overshoot < 1.0 {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "overshoot",
                value: raw.overshoot.to_string(),
                reason: "Must be a finite factor of at least 1.0".to_string(),
            }
            .into());
        }

        Ok(RunnerConfig {
            min_iterations: raw.min_iterations,
            max_iterations: raw.max_iterations,
            min_time: Duration::from_millis(raw.min_time_ms),
            overshoot: raw.overshoot,
        })
    }
}
