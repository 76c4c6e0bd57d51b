//! Core library for sweep analysis.
//!
//! Locates the peak (or dip) of a sampled curve near a target location and
//! extracts the two positions where the curve crosses a level offset from it,
//! e.g. the -3 dB bandwidth of a resonance in an instrument sweep.
//!
//! Instrument communication and data ingestion live elsewhere: the engine only
//! consumes two equal-length `f64` sequences and returns coordinates.
//!
//! ```
//! use sweep_analysis::analysis::{analyze, SweepParams, Target};
//!
//! let x: Vec<f64> = (0..7).map(f64::from).collect();
//! let y = [0.0, 1.0, 3.0, 5.0, 3.0, 1.0, 0.0];
//! let params = SweepParams::default().with_target(Target::Near(2.5)).with_depth(3);
//! let result = analyze(&x, &y, &params)?;
//! assert_eq!(result.extremum.x, Some(3.0));
//! # Ok::<(), sweep_analysis::error::SweepError>(())
//! ```

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod logging;

pub use analysis::{analyze, Comparator, Point, Sample, SweepParams, SweepResult, Target};
pub use analyzer::BandwidthAnalyzer;
pub use error::{AppResult, SweepError};
