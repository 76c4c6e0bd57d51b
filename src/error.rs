//! Custom error types for sweep analysis.
//!
//! This module defines the primary error type, `SweepError`, for the whole crate.
//! Using the `thiserror` crate, it gives one consistent error surface for both the
//! numerical core and the ambient layers (configuration, CLI input).
//!
//! ## Error Hierarchy
//!
//! - **`EmptyInput`**: The series has no samples. The question "where is the peak"
//!   is ill-posed, so this is surfaced rather than answered with a placeholder.
//! - **`Ordering`**: The x axis is neither non-decreasing nor non-increasing.
//! - **`LengthMismatch`**: `x` and `y` do not have the same number of samples.
//! - **`Interpolation`**: The crossing solver was handed something other than two
//!   bracketing samples. This is an internal invariant violation and indicates a defect.
//! - **`InvalidDepth`**: The locator was asked to try zero smoothing orders.
//! - **`Config`** / **`Configuration`**: Figment load failures and semantic
//!   validation failures respectively.
//! - **`Io`** / **`Json`**: Reading a series for the command line front end.
//!
//! Every other degenerate case (single sample, unreachable crossing, no local
//! extremum at any scale) is handled by a fallback policy and never becomes an error.

use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type AppResult<T> = std::result::Result<T, SweepError>;

/// Errors produced by sweep analysis.
#[derive(Error, Debug)]
pub enum SweepError {
    /// The series contains no samples.
    #[error("Empty input: the series contains no samples")]
    EmptyInput,

    /// The x axis is not monotonic.
    #[error("x axis is not sorted (order breaks at index {index})")]
    Ordering {
        /// First index `i` for which `x[i] > x[i + 1]` after normalisation.
        index: usize,
    },

    /// `x` and `y` have different lengths.
    #[error("Length mismatch: x has {x} samples, y has {y}")]
    LengthMismatch {
        /// Number of x samples.
        x: usize,
        /// Number of y samples.
        y: usize,
    },

    /// Linear interpolation received the wrong number of bracketing points.
    #[error("Two points were expected for interpolation, {0} were given")]
    Interpolation(usize),

    /// Depth must be at least one.
    #[error("Locator depth must be at least 1")]
    InvalidDepth,

    /// Figment failed to load or extract the configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// The configuration parsed but holds invalid values.
    #[error("Configuration validation error: {0}")]
    Configuration(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging initialisation error: {0}")]
    Logging(String),

    /// I/O error while reading a series.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A series document could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
