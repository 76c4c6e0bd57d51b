//! Tracing initialisation.
//!
//! Installs a global `tracing_subscriber::fmt` subscriber. The configured
//! level is the default filter; `RUST_LOG` overrides it for fine-grained
//! filtering:
//!
//! ```bash
//! RUST_LOG=sweep_analysis::analysis=debug sweep_analyse sweep.json
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::AnalysisConfig;
use crate::error::{AppResult, SweepError};

/// Initialise tracing from configuration.
///
/// # Errors
///
/// Returns [`SweepError::Logging`] if a global subscriber is already installed
/// or the configured level is not a valid filter directive.
pub fn init_from_config(config: &AnalysisConfig) -> AppResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.application.log_level)
            .map_err(|e| SweepError::Logging(e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.application.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| SweepError::Logging(e.to_string()))
}
