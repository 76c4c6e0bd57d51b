//! Level-crossing bandwidth finder.
//!
//! Starting from the extremum, each side is scanned outward until the curve
//! passes `extremum.y + level`. The crossing is then solved on the straight
//! line through the two samples bracketing it.
//!
//! Crossing condition per sample, walking away from the extremum:
//!
//! ```text
//! level < 0:  y <= extremum.y + level   (drop below a peak)
//! level > 0:  y >= extremum.y + level   (rise above a dip)
//! ```

use tracing::{debug, error, warn};

use super::{nearest_index, Point, Sample};
use crate::error::{AppResult, SweepError};

/// Finds the left and right level crossings around `extremum`.
///
/// - An empty series yields two undetermined points.
/// - A single-sample series, or a one-sample side, yields that sample.
/// - `level == 0` yields the extremum on both sides.
/// - A side that never crosses yields its outermost sample.
/// - Without `interpolate`, the first sample past the crossing is returned as-is.
///
/// The scan starts at the sample matching `extremum` exactly, or at the sample
/// with the nearest x when there is none. `x` must already be ascending (see
/// [`super::normalize`]).
///
/// # Errors
///
/// Returns [`SweepError::Interpolation`] only if the bracketing invariant is
/// broken, which can happen when y contains NaN.
pub fn bandwidth(
    x: &[f64],
    y: &[f64],
    level: f64,
    extremum: Sample,
    interpolate: bool,
) -> AppResult<(Point, Point)> {
    if x.len() != y.len() {
        return Err(SweepError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let Some(index) = sample_index(x, y, extremum) else {
        return Ok((Point::undetermined(), Point::undetermined()));
    };

    let (left, right) = crossings_at(x, y, level, extremum, index, interpolate)?;
    Ok((left.point, right.point))
}

/// A reported crossing and the index of the sample it was taken from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Crossing {
    pub point: Point,
    pub index: usize,
}

impl Crossing {
    fn new(point: Point, index: usize) -> Self {
        Self { point, index }
    }
}

/// Position of `extremum` in the series; duplicated x values resolve by y.
fn sample_index(x: &[f64], y: &[f64], extremum: Sample) -> Option<usize> {
    x.iter()
        .zip(y)
        .position(|(&sx, &sy)| sx == extremum.x && sy == extremum.y)
        .or_else(|| nearest_index(x, extremum.x))
}

/// Crossings on both sides of the sample at `index`, which must be in range.
pub(crate) fn crossings_at(
    x: &[f64],
    y: &[f64],
    level: f64,
    extremum: Sample,
    index: usize,
    interpolate: bool,
) -> AppResult<(Crossing, Crossing)> {
    let target_y = extremum.y + level;

    let left: Vec<usize> = (0..=index).rev().collect();
    let right: Vec<usize> = (index..x.len()).collect();

    let left = side_crossing(x, y, &left, target_y, level, extremum, interpolate)?;
    let right = side_crossing(x, y, &right, target_y, level, extremum, interpolate)?;
    Ok((left, right))
}

/// Crossing on one side; `side` lists sample indices walking away from the
/// extremum, starting at it.
fn side_crossing(
    x: &[f64],
    y: &[f64],
    side: &[usize],
    target_y: f64,
    level: f64,
    extremum: Sample,
    interpolate: bool,
) -> AppResult<Crossing> {
    let sample = |i: usize| Sample::new(x[i], y[i]);

    let (Some(&start), Some(&outermost)) = (side.first(), side.last()) else {
        return Err(SweepError::EmptyInput);
    };
    if side.len() == 1 {
        return Ok(Crossing::new(sample(outermost).into(), outermost));
    }
    if level == 0.0 {
        return Ok(Crossing::new(extremum.into(), start));
    }

    let passed = |i: usize| {
        if level < 0.0 {
            y[i] <= target_y
        } else {
            y[i] >= target_y
        }
    };
    let still_inside = |i: usize| {
        if level < 0.0 {
            y[i] > target_y
        } else {
            y[i] < target_y
        }
    };

    let Some(crossed) = side.iter().position(|&i| passed(i)) else {
        warn!(
            target_y,
            x = x[outermost],
            "level never crossed on this side, reporting the last sample"
        );
        return Ok(Crossing::new(sample(outermost).into(), outermost));
    };
    let crossed_index = side[crossed];

    // Walk back from the crossing toward the extremum for the bracketing pair.
    let back: Vec<usize> = side[..=crossed].iter().rev().copied().collect();
    let Some(inside) = back.iter().position(|&i| still_inside(i)) else {
        return Ok(Crossing::new(sample(crossed_index).into(), crossed_index));
    };
    let bracket: Vec<Sample> = back[..=inside].iter().map(|&i| sample(i)).collect();

    let point = if interpolate {
        interpolate_crossing(&bracket, target_y)?
    } else {
        sample(crossed_index).into()
    };
    Ok(Crossing::new(point, crossed_index))
}

/// Solves for the x at which the line through two samples reaches `target_y`.
///
/// With `a` and `b` the slope and intercept of the line, `x = (target_y - b) / a`.
/// Two samples sharing the same x return that x.
///
/// # Errors
///
/// [`SweepError::Interpolation`] unless exactly two samples are given.
pub fn interpolate_crossing(bracket: &[Sample], target_y: f64) -> AppResult<Point> {
    let [p0, p1] = bracket else {
        error!(
            points = bracket.len(),
            "crossing interpolation invariant violated"
        );
        return Err(SweepError::Interpolation(bracket.len()));
    };

    let a = (p1.y - p0.y) / (p1.x - p0.x);
    if a == 0.0 || !a.is_finite() {
        return Ok(Point::new(p0.x, target_y));
    }
    let b = p0.y - a * p0.x;
    let x = (target_y - b) / a;

    debug!(x, y = target_y, "interpolated level crossing");
    Ok(Point::new(x, target_y))
}
