//! Stateful bandwidth analyzer for reporting layers.
//!
//! `BandwidthAnalyzer` owns the most recent series and the persistent search
//! settings, and keeps the last result around for readout. It is what a
//! display or instrument-control layer talks to: push new data, tweak the
//! level or comparator, read `x_left`/`x_width` back.
//!
//! Unlike [`analyze`], a failed search never leaves stale numbers behind: the
//! error is logged and the results fall back to a placeholder record, so a
//! periodic refresh keeps running on bad data.

use tracing::{debug, info, warn};

use crate::analysis::{analyze, Comparator, Point, SeriesStats, SweepResult, Target};
use crate::config::BandwidthConfig;
use crate::error::{AppResult, SweepError};

/// Placeholder y reported when no bandwidth could be found.
pub const PLACEHOLDER_Y: f64 = -99.0;

/// Holds a series, search settings and the last search result.
#[derive(Debug, Clone)]
pub struct BandwidthAnalyzer {
    x: Vec<f64>,
    y: Vec<f64>,
    settings: BandwidthConfig,
    results: SweepResult,
}

impl Default for BandwidthAnalyzer {
    fn default() -> Self {
        Self::new(BandwidthConfig::default())
    }
}

impl BandwidthAnalyzer {
    /// Creates an analyzer with no data and the given default settings.
    pub fn new(settings: BandwidthConfig) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            settings,
            results: placeholder_results(),
        }
    }

    /// Replaces the series and re-runs the search with the current settings.
    ///
    /// # Errors
    ///
    /// [`SweepError::LengthMismatch`] if `x` and `y` differ in length; the
    /// previous series is kept in that case.
    pub fn set_data(&mut self, x: Vec<f64>, y: Vec<f64>) -> AppResult<()> {
        if x.len() != y.len() {
            return Err(SweepError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        self.x = x;
        self.y = y;
        self.refresh();
        Ok(())
    }

    /// Current x samples.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Current y samples.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Current settings.
    pub fn settings(&self) -> &BandwidthConfig {
        &self.settings
    }

    /// Last search result (placeholder if the last search failed).
    pub fn results(&self) -> &SweepResult {
        &self.results
    }

    /// Searches the bandwidth around `target` and stores it as the new target.
    ///
    /// On failure the results are reset to the placeholder record and the
    /// error is logged as well as returned.
    ///
    /// # Errors
    ///
    /// Any error from [`analyze`], including [`SweepError::EmptyInput`] when no
    /// data has been set.
    pub fn search_bandwidth(&mut self, target: Target) -> AppResult<SweepResult> {
        self.settings.target_x = match target {
            Target::Global => None,
            Target::Near(x) => Some(x),
        };

        match analyze(&self.x, &self.y, &self.settings.to_params()) {
            Ok(results) => {
                info!(
                    left = ?results.left.x,
                    extremum = ?results.extremum.x,
                    right = ?results.right.x,
                    "bandwidth found"
                );
                self.results = results;
                Ok(results)
            }
            Err(e) => {
                warn!(error = %e, "couldn't find the bandwidth, resetting results");
                self.results = placeholder_results();
                Err(e)
            }
        }
    }

    /// Sets the crossing level and refreshes.
    pub fn set_level(&mut self, level: f64) {
        self.settings.level = level;
        self.refresh();
    }

    /// Sets the locator depth and refreshes.
    pub fn set_depth(&mut self, depth: usize) {
        self.settings.depth = depth;
        self.refresh();
    }

    /// Sets the comparator (legacy booleans accepted) and refreshes.
    pub fn set_comparator(&mut self, comparator: impl Into<Comparator>) {
        self.settings.comparator = comparator.into();
        self.refresh();
    }

    /// Enables or disables zero-sample removal and refreshes.
    pub fn set_remove_zero(&mut self, remove_zero: bool) {
        self.settings.remove_zero = remove_zero;
        self.refresh();
    }

    /// x of the left crossing.
    pub fn x_left(&self) -> Option<f64> {
        self.results.left.x
    }

    /// y of the left crossing.
    pub fn y_left(&self) -> Option<f64> {
        self.results.left.y
    }

    /// x of the extremum.
    pub fn x_extremum(&self) -> Option<f64> {
        self.results.extremum.x
    }

    /// y of the extremum.
    pub fn y_extremum(&self) -> Option<f64> {
        self.results.extremum.y
    }

    /// x of the right crossing.
    pub fn x_right(&self) -> Option<f64> {
        self.results.right.x
    }

    /// y of the right crossing.
    pub fn y_right(&self) -> Option<f64> {
        self.results.right.y
    }

    /// Distance between the two crossings.
    pub fn x_width(&self) -> Option<f64> {
        self.results.width()
    }

    /// Summary statistics of the current series.
    ///
    /// # Errors
    ///
    /// [`SweepError::EmptyInput`] when no data has been set.
    pub fn stats(&self) -> AppResult<SeriesStats> {
        SeriesStats::compute(&self.x, &self.y)
    }

    /// Re-runs the search with the stored settings.
    ///
    /// Setters cannot fail: a failed search leaves the placeholder results in
    /// place and is reported through the log only.
    fn refresh(&mut self) {
        if self.x.is_empty() {
            self.results = placeholder_results();
            return;
        }
        let target = self.settings.to_params().target;
        if let Err(e) = self.search_bandwidth(target) {
            debug!(error = %e, "refresh kept the placeholder results");
        }
    }
}

/// The record reported when no bandwidth is available.
pub fn placeholder_results() -> SweepResult {
    let placeholder = Point::new(0.0, PLACEHOLDER_Y);
    SweepResult {
        left: placeholder,
        extremum: placeholder,
        right: placeholder,
    }
}
