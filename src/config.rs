//! Configuration system using Figment
//!
//! This module provides strongly-typed configuration loading for the analysis
//! front ends. Configuration is layered, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. A TOML file (`config/sweep.toml` by default, silently skipped if absent)
//! 3. Environment variables (prefixed with `SWEEP_`, nesting on `__`)
//!
//! # Environment Variable Overrides
//!
//! ```text
//! SWEEP_APPLICATION__LOG_LEVEL=debug
//! SWEEP_BANDWIDTH__LEVEL=-6
//! SWEEP_BANDWIDTH__COMPARATOR=less
//! SWEEP_BANDWIDTH__DEPTH=4
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sweep_analysis::config::AnalysisConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig::load()?;
//!     println!("Log level: {}", config.application.log_level);
//!     println!("Level offset: {}", config.bandwidth.level);
//!     Ok(())
//! }
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{Comparator, SweepParams, Target};
use crate::error::{AppResult, SweepError};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/sweep.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "SWEEP_";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Application settings
    #[serde(default)]
    pub application: ApplicationConfig,
    /// Default bandwidth search settings
    #[serde(default)]
    pub bandwidth: BandwidthConfig,
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// Bandwidth search settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthConfig {
    /// x value near which to search; absent (or the legacy `-1`) means global extremum
    #[serde(default)]
    pub target_x: Option<f64>,
    /// Signed offset from the extremum defining the crossing level (e.g. -3 dB)
    #[serde(default = "default_level")]
    pub level: f64,
    /// Number of window orders tried by the locator
    #[serde(default = "default_depth")]
    pub depth: usize,
    /// "greater" for peaks, "less" for dips (a boolean is accepted too)
    #[serde(default)]
    pub comparator: Comparator,
    /// Drop zero-valued padding samples before analysis
    #[serde(default)]
    pub remove_zero: bool,
}

impl Default for BandwidthConfig {
    fn default() -> Self {
        Self {
            target_x: None,
            level: default_level(),
            depth: default_depth(),
            comparator: Comparator::Greater,
            remove_zero: false,
        }
    }
}

impl BandwidthConfig {
    /// Converts the settings into analysis parameters.
    pub fn to_params(&self) -> SweepParams {
        SweepParams {
            target: self.target_x.map_or(Target::Global, Target::from_legacy),
            level: self.level,
            comparator: self.comparator,
            depth: self.depth,
            remove_zero: self.remove_zero,
        }
    }
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_log_level() -> String {
    "info".to_string()
}

fn default_level() -> f64 {
    -3.0
}

fn default_depth() -> usize {
    1
}

// ============================================================================
// Configuration Loading and Validation
// ============================================================================

impl AnalysisConfig {
    /// Load configuration from `config/sweep.toml` and environment variables
    ///
    /// # Errors
    ///
    /// Returns a `SweepError` if extraction or validation fails.
    pub fn load() -> AppResult<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific file path
    ///
    /// A missing file leaves the defaults in place; environment variables
    /// still apply.
    ///
    /// # Errors
    ///
    /// Returns a `SweepError` if the file is malformed or validation fails.
    pub fn load_from<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        Self::from_figment(Self::figment(path))
    }

    /// Layered provider stack used by [`AnalysisConfig::load_from`].
    pub fn figment<P: AsRef<Path>>(path: P) -> Figment {
        Figment::from(Serialized::defaults(AnalysisConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration from any figment.
    ///
    /// # Errors
    ///
    /// Returns a `SweepError` if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> AppResult<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// Checks:
    /// - Log level is valid (trace, debug, info, warn, error)
    /// - Depth is at least 1
    /// - Level and target are finite numbers
    ///
    /// # Errors
    ///
    /// Returns `SweepError::Configuration` with a descriptive message.
    pub fn validate(&self) -> AppResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.application.log_level.as_str()) {
            return Err(SweepError::Configuration(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.application.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.bandwidth.depth == 0 {
            return Err(SweepError::Configuration(
                "Invalid depth 0. Must be at least 1".to_string(),
            ));
        }

        if !self.bandwidth.level.is_finite() {
            return Err(SweepError::Configuration(format!(
                "Invalid level {}. Must be a finite number",
                self.bandwidth.level
            )));
        }

        if let Some(target) = self.bandwidth.target_x {
            if !target.is_finite() {
                return Err(SweepError::Configuration(format!(
                    "Invalid target_x {target}. Must be a finite number"
                )));
            }
        }

        Ok(())
    }
}
