//! Sweep orchestrator: the public entry point of the engine.

use tracing::{debug, debug_span};

use super::bandwidth::crossings_at;
use super::extremum::locate_index;
use super::normalize::normalize;
use super::{Sample, SweepParams, SweepResult, Target};
use crate::error::{AppResult, SweepError};

/// Analyses a sweep and returns the extremum with its two level crossings.
///
/// The series is normalised first (ascending x, optional zero removal). With
/// [`Target::Global`] the extremum is the global maximum (or minimum) of the
/// series; with [`Target::Near`] it is chosen by the multi-order locator. The
/// crossings are then interpolated around it.
///
/// # Example
///
/// ```
/// use sweep_analysis::analysis::{analyze, Point, SweepParams};
///
/// let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let y = [0.0, 1.0, 3.0, 5.0, 3.0, 1.0, 0.0];
/// let result = analyze(&x, &y, &SweepParams::default()).unwrap();
///
/// assert_eq!(result.extremum, Point::new(3.0, 5.0));
/// assert_eq!(result.width(), Some(3.0));
/// ```
///
/// # Errors
///
/// - [`SweepError::EmptyInput`] if `x` is empty.
/// - [`SweepError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`SweepError::Ordering`] if x is not monotonic.
/// - [`SweepError::InvalidDepth`] if a target is given with `depth == 0`.
/// - [`SweepError::Interpolation`] if the crossing solver invariant breaks.
pub fn analyze(x: &[f64], y: &[f64], params: &SweepParams) -> AppResult<SweepResult> {
    if x.is_empty() {
        return Err(SweepError::EmptyInput);
    }

    let span = debug_span!("sweep_analyse", samples = x.len(), level = params.level);
    let _enter = span.enter();

    let series = normalize(x, y, params.remove_zero)?;

    let index = match params.target {
        Target::Global => params
            .comparator
            .best_index(&series.y)
            .ok_or(SweepError::EmptyInput)?,
        Target::Near(target_x) => locate_index(
            &series.x,
            &series.y,
            target_x,
            params.level,
            params.depth,
            params.comparator,
        )?,
    };
    let extremum = Sample::new(series.x[index], series.y[index]);
    debug!(index, x = extremum.x, y = extremum.y, "extremum selected");

    let (left, right) = crossings_at(&series.x, &series.y, params.level, extremum, index, true)?;

    Ok(SweepResult {
        left: left.point,
        extremum: extremum.into(),
        right: right.point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Comparator, Point};

    fn gaussian(n: usize, centre: f64, sigma: f64, height: f64) -> Vec<f64> {
        (0..n)
            .map(|i| height * (-((i as f64 - centre).powi(2)) / (2.0 * sigma * sigma)).exp())
            .collect()
    }

    #[test]
    fn test_global_peak_scenario() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [0.0, 1.0, 3.0, 5.0, 3.0, 1.0, 0.0];
        let result = analyze(&x, &y, &SweepParams::default()).unwrap();
        assert_eq!(result.extremum, Point::new(3.0, 5.0));
        assert!((result.left.x.unwrap() - 1.5).abs() < 1e-9);
        assert!((result.right.x.unwrap() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_target_selects_secondary_peak() {
        let n = 101;
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let main = gaussian(n, 20.0, 5.0, 1.0);
        let side = gaussian(n, 70.0, 5.0, 0.6);
        let y: Vec<f64> = main.iter().zip(&side).map(|(a, b)| a + b).collect();

        let params = SweepParams::default()
            .with_level(-0.3)
            .with_depth(3)
            .with_target(Target::Near(68.0));
        let result = analyze(&x, &y, &params).unwrap();
        assert_eq!(result.extremum.x, Some(70.0));

        let global = analyze(&x, &y, &params.with_target(Target::Global)).unwrap();
        assert_eq!(global.extremum.x, Some(20.0));
    }

    #[test]
    fn test_dip_with_legacy_flag() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [0.0, -1.0, -3.0, -5.0, -3.0, -1.0, 0.0];
        let params = SweepParams::default().with_comparator(false).with_level(3.0);
        assert_eq!(params.comparator, Comparator::Less);
        let result = analyze(&x, &y, &params).unwrap();
        assert_eq!(result.extremum, Point::new(3.0, -5.0));
        assert!((result.left.x.unwrap() - 1.5).abs() < 1e-9);
        assert!((result.right.x.unwrap() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_x_keeps_the_selected_peak() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 3.0, 2.0];
        let params = SweepParams::default()
            .with_target(Target::Near(5.0))
            .with_depth(3);
        let result = analyze(&x, &y, &params).unwrap();
        assert_eq!(result.extremum, Point::new(5.0, 3.0));

        let global = analyze(&x, &y, &params.with_target(Target::Global)).unwrap();
        assert_eq!(global.extremum, Point::new(5.0, 3.0));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            analyze(&[], &[], &SweepParams::default()),
            Err(SweepError::EmptyInput)
        ));
    }

    #[test]
    fn test_zero_depth_with_target_is_an_error() {
        let params = SweepParams::default()
            .with_target(Target::Near(1.0))
            .with_depth(0);
        assert!(matches!(
            analyze(&[0.0, 1.0], &[0.0, 1.0], &params),
            Err(SweepError::InvalidDepth)
        ));
    }
}
