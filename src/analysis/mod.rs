//! Peak location and level-crossing bandwidth extraction.
//!
//! The engine analyses a sampled curve (a frequency response, a power sweep,
//! a spectrum) and reports, for a peak or dip near a target location, the
//! extremum itself plus the two x positions where the curve crosses a level
//! offset from that extremum (the classic "-3 dB points").
//!
//! # Pipeline
//!
//! ```text
//! (x, y) --normalize--> Series --+-- Target::Global --> global_extremum --+
//!                                |                                        +--> bandwidth --> SweepResult
//!                                +-- Target::Near(t) --> locate ----------+
//! ```
//!
//! - [`normalize`] puts the x axis in ascending order and optionally drops
//!   zero-valued padding samples.
//! - [`locate`] votes across several local-extremum window sizes to pick the
//!   extremum closest to a target x.
//! - [`bandwidth`] walks outward from the extremum on both sides and linearly
//!   interpolates the level crossings.
//! - [`analyze`] wires the above together.
//!
//! Every call is a pure function of its inputs: there is no shared state and
//! callers may analyse different series concurrently.

use serde::{Deserialize, Serialize};

pub mod bandwidth;
pub mod extremum;
pub mod normalize;
pub mod stats;
pub mod sweep;

pub use bandwidth::{bandwidth, interpolate_crossing};
pub use extremum::{find_local_extrema, global_extremum, locate, locator_orders};
pub use normalize::{normalize, Series};
pub use stats::{y_at, SeriesStats};
pub use sweep::analyze;

/// Sentinel used by legacy callers to request the global extremum.
pub const LEGACY_GLOBAL_TARGET: f64 = -1.0;

// =============================================================================
// Comparator
// =============================================================================

/// Polarity of the extremum being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "ComparatorRepr")]
pub enum Comparator {
    /// Peak seeking: the extremum is a maximum.
    #[default]
    Greater,
    /// Dip seeking: the extremum is a minimum.
    Less,
}

impl Comparator {
    /// Returns true when `a` strictly beats `b` under this polarity.
    pub fn beats(self, a: f64, b: f64) -> bool {
        match self {
            Comparator::Greater => a > b,
            Comparator::Less => a < b,
        }
    }

    /// Index of the first maximum (or minimum) of `values`.
    pub fn best_index(self, values: &[f64]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &v) in values.iter().enumerate() {
            match best {
                Some(b) if !self.beats(v, values[b]) => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

impl From<bool> for Comparator {
    fn from(greater: bool) -> Self {
        if greater {
            Comparator::Greater
        } else {
            Comparator::Less
        }
    }
}

/// Wire representation accepting both the named form and the legacy flag.
#[derive(Deserialize)]
#[serde(untagged)]
enum ComparatorRepr {
    Flag(bool),
    Named(NamedComparator),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum NamedComparator {
    Greater,
    Less,
}

impl From<ComparatorRepr> for Comparator {
    fn from(repr: ComparatorRepr) -> Self {
        match repr {
            ComparatorRepr::Flag(flag) => Comparator::from(flag),
            ComparatorRepr::Named(NamedComparator::Greater) => Comparator::Greater,
            ComparatorRepr::Named(NamedComparator::Less) => Comparator::Less,
        }
    }
}

// =============================================================================
// Coordinates
// =============================================================================

/// A determined sample coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Independent variable.
    pub x: f64,
    /// Dependent variable.
    pub y: f64,
}

impl Sample {
    /// Creates a sample at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A coordinate pair that may be undetermined (e.g. for an empty series).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Independent variable, `None` when not determined.
    pub x: Option<f64>,
    /// Dependent variable, `None` when not determined.
    pub y: Option<f64>,
}

impl Point {
    /// Creates a determined point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// The "not determined" pair.
    pub fn undetermined() -> Self {
        Self { x: None, y: None }
    }

    /// Returns the point as a [`Sample`] when both coordinates are known.
    pub fn sample(&self) -> Option<Sample> {
        Some(Sample::new(self.x?, self.y?))
    }
}

impl From<Sample> for Point {
    fn from(s: Sample) -> Self {
        Point::new(s.x, s.y)
    }
}

// =============================================================================
// Parameters & results
// =============================================================================

/// Where to look for the extremum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Use the global extremum of the whole series.
    #[default]
    Global,
    /// Use the local extremum closest to this x value.
    Near(f64),
}

impl Target {
    /// Maps a legacy target value, where `-1` means "global", to a `Target`.
    pub fn from_legacy(value: f64) -> Self {
        if value == LEGACY_GLOBAL_TARGET {
            Target::Global
        } else {
            Target::Near(value)
        }
    }
}

/// Parameters for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    /// Extremum selection.
    pub target: Target,
    /// Signed offset from the extremum y value defining the crossing level.
    pub level: f64,
    /// Peak or dip.
    pub comparator: Comparator,
    /// Number of window orders tried by the locator.
    pub depth: usize,
    /// Drop zero-valued samples before analysis (unless all are zero).
    pub remove_zero: bool,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            target: Target::Global,
            level: -3.0,
            comparator: Comparator::Greater,
            depth: 1,
            remove_zero: false,
        }
    }
}

impl SweepParams {
    /// Sets the extremum selection.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Sets the crossing level offset.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Sets the comparator; accepts the legacy boolean flag as well.
    pub fn with_comparator(mut self, comparator: impl Into<Comparator>) -> Self {
        self.comparator = comparator.into();
        self
    }

    /// Sets the locator depth.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Enables or disables zero-sample removal.
    pub fn with_remove_zero(mut self, remove_zero: bool) -> Self {
        self.remove_zero = remove_zero;
        self
    }
}

/// Outcome of a sweep analysis: the extremum and both level crossings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepResult {
    /// Crossing on the low-x side of the extremum.
    pub left: Point,
    /// The selected extremum.
    pub extremum: Point,
    /// Crossing on the high-x side of the extremum.
    pub right: Point,
}

impl SweepResult {
    /// Distance between the two crossings, when both are determined.
    pub fn width(&self) -> Option<f64> {
        Some((self.right.x? - self.left.x?).abs())
    }
}

/// Index of the first sample whose x is closest to `target`.
pub(crate) fn nearest_index(xs: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in xs.iter().enumerate() {
        let distance = (x - target).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}
