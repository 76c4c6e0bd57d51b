//! Sample normalisation: ascending x order and optional zero-sample removal.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{AppResult, SweepError};

/// An owned `(x, y)` series with ascending x.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    /// Independent variable, non-decreasing.
    pub x: Vec<f64>,
    /// Dependent variable.
    pub y: Vec<f64>,
}

impl Series {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Normalises `(x, y)` so that x is non-decreasing.
///
/// A non-increasing x axis is reversed together with y. Any other ordering is
/// rejected with [`SweepError::Ordering`]. With `remove_zero`, samples whose y
/// is exactly zero are dropped, unless every y is zero, in which case the series
/// is kept intact.
///
/// # Errors
///
/// - [`SweepError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`SweepError::Ordering`] if x is neither ascending nor descending.
pub fn normalize(x: &[f64], y: &[f64], remove_zero: bool) -> AppResult<Series> {
    if x.len() != y.len() {
        return Err(SweepError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let mut xs = x.to_vec();
    let mut ys = y.to_vec();

    if xs.windows(2).all(|w| w[0] >= w[1]) {
        xs.reverse();
        ys.reverse();
    }

    // NaN compares as unordered and counts as a break in ordering.
    if let Some(index) = xs.windows(2).position(|w| {
        !matches!(
            w[0].partial_cmp(&w[1]),
            Some(Ordering::Less | Ordering::Equal)
        )
    }) {
        return Err(SweepError::Ordering { index });
    }

    if remove_zero && ys.iter().any(|&v| v != 0.0) {
        let before = ys.len();
        let (kept_x, kept_y): (Vec<f64>, Vec<f64>) = xs
            .into_iter()
            .zip(ys)
            .filter(|&(_, v)| v != 0.0)
            .unzip();
        xs = kept_x;
        ys = kept_y;
        trace!(removed = before - ys.len(), "dropped zero-valued samples");
    }

    Ok(Series { x: xs, y: ys })
}
