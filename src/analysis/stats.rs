//! Summary statistics and point lookup on a series.

use serde::{Deserialize, Serialize};

use super::{Comparator, Sample};
use crate::error::{AppResult, SweepError};

/// Summary statistics of a series.
///
/// `min` and `max` hold the extreme y value together with the x at which it
/// first occurs. `mean` and `std` hold the per-axis mean and population
/// standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Smallest y and its x.
    pub min: Sample,
    /// Largest y and its x.
    pub max: Sample,
    /// Mean of x and mean of y.
    pub mean: Sample,
    /// Population standard deviation of x and of y.
    pub std: Sample,
}

impl SeriesStats {
    /// Computes the statistics of `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`SweepError::EmptyInput`] for an empty series and
    /// [`SweepError::LengthMismatch`] if the axes differ in length.
    pub fn compute(x: &[f64], y: &[f64]) -> AppResult<Self> {
        if x.len() != y.len() {
            return Err(SweepError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let min = Comparator::Less
            .best_index(y)
            .ok_or(SweepError::EmptyInput)?;
        let max = Comparator::Greater
            .best_index(y)
            .ok_or(SweepError::EmptyInput)?;

        let (mean_x, std_x) = mean_std(x);
        let (mean_y, std_y) = mean_std(y);

        Ok(Self {
            min: Sample::new(x[min], y[min]),
            max: Sample::new(x[max], y[max]),
            mean: Sample::new(mean_x, mean_y),
            std: Sample::new(std_x, std_y),
        })
    }
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// y value of the series at an arbitrary `value` of x.
///
/// Interpolates linearly through the two samples closest in x (on equal
/// distance the earlier sample ranks first). This assumes roughly regular
/// spacing; when the two samples share an x, the first one's y is returned.
///
/// # Errors
///
/// [`SweepError::EmptyInput`] for an empty series and
/// [`SweepError::LengthMismatch`] if the axes differ in length.
pub fn y_at(x: &[f64], y: &[f64], value: f64) -> AppResult<f64> {
    if x.len() != y.len() {
        return Err(SweepError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let mut order: Vec<usize> = (0..x.len()).collect();
    // Stable sort keeps the earlier sample first on equal distance.
    order.sort_by(|&a, &b| (x[a] - value).abs().total_cmp(&(x[b] - value).abs()));

    match *order.as_slice() {
        [] => Err(SweepError::EmptyInput),
        [only] => Ok(y[only]),
        [first, second, ..] => {
            let (x1, x2, y1, y2) = (x[first], x[second], y[first], y[second]);
            if x1 == x2 {
                return Ok(y1);
            }
            let a = (y2 - y1) / (x2 - x1);
            let b = y1 - a * x1;
            Ok(a * value + b)
        }
    }
}
