//! Local extremum locator.
//!
//! Windowed local-extremum detection is sensitive to the window size: a
//! narrow window reports every noise spike, a wide one can skip the peak the
//! user is pointing at. The locator therefore runs detection at several window
//! half-widths ("orders"), refines each order's pick to the true sample-level
//! extremum, and lets the orders vote.
//!
//! For each order:
//!
//! 1. find every local extremum (see [`find_local_extrema`]);
//! 2. keep the candidate whose x is closest to the target;
//! 3. compute its coarse bandwidth and re-select the extremum between the two
//!    crossing samples.
//!
//! The refined x reported most often wins. Ties go to the x closest to the
//! target, then to the smaller x.

use tracing::{debug, trace, warn};

use super::bandwidth::crossings_at;
use super::{nearest_index, Comparator, Sample};
use crate::error::{AppResult, SweepError};

/// Window half-widths tried for `depth` locator passes.
///
/// Order `k` (1-based) is `(((k - 1) mod 3)^2 + 1) * 10^((k - 1) / 3)`, i.e.
/// 1, 2, 5, 10, 20, 50, 100, 200, ... Saturates at `usize::MAX`.
pub fn locator_orders(depth: usize) -> Vec<usize> {
    (0..depth)
        .map(|k| {
            let base = (k % 3).pow(2) + 1;
            u32::try_from(k / 3)
                .ok()
                .and_then(|exp| 10usize.checked_pow(exp))
                .and_then(|scale| scale.checked_mul(base))
                .unwrap_or(usize::MAX)
        })
        .collect()
}

/// Indices of the local extrema of `y` for a window half-width of `order`.
///
/// An interior sample qualifies if it strictly beats every other sample within
/// `order` positions on both sides (the window is clipped at the ends). The
/// first and last samples are never found by the window; they are added when
/// they strictly beat their single neighbour. Indices are ascending.
pub fn find_local_extrema(y: &[f64], order: usize, comparator: Comparator) -> Vec<usize> {
    let n = y.len();
    if n < 2 {
        return Vec::new();
    }

    let mut indices = Vec::new();

    if comparator.beats(y[0], y[1]) {
        indices.push(0);
    }

    for i in 1..n - 1 {
        let lo = i.saturating_sub(order);
        let hi = i.saturating_add(order).min(n - 1);
        let is_extremum = (lo..=hi)
            .filter(|&j| j != i)
            .all(|j| comparator.beats(y[i], y[j]));
        if is_extremum {
            indices.push(i);
        }
    }

    if comparator.beats(y[n - 1], y[n - 2]) {
        indices.push(n - 1);
    }

    indices
}

/// Global maximum (or minimum) of the series, first occurrence on ties.
pub fn global_extremum(x: &[f64], y: &[f64], comparator: Comparator) -> Option<Sample> {
    let i = comparator.best_index(y)?;
    Some(Sample::new(*x.get(i)?, y[i]))
}

/// Finds the local extremum closest to `target_x` by voting across
/// `depth` window orders.
///
/// Falls back to the global extremum when no order yields a candidate.
///
/// # Errors
///
/// - [`SweepError::InvalidDepth`] if `depth == 0`.
/// - [`SweepError::EmptyInput`] if the series is empty.
/// - [`SweepError::LengthMismatch`] if `x` and `y` differ in length.
pub fn locate(
    x: &[f64],
    y: &[f64],
    target_x: f64,
    level: f64,
    depth: usize,
    comparator: Comparator,
) -> AppResult<Sample> {
    let index = locate_index(x, y, target_x, level, depth, comparator)?;
    Ok(Sample::new(x[index], y[index]))
}

/// Index of the sample [`locate`] selects.
pub(crate) fn locate_index(
    x: &[f64],
    y: &[f64],
    target_x: f64,
    level: f64,
    depth: usize,
    comparator: Comparator,
) -> AppResult<usize> {
    if depth == 0 {
        return Err(SweepError::InvalidDepth);
    }
    if x.len() != y.len() {
        return Err(SweepError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(SweepError::EmptyInput);
    }

    let mut votes = Vec::with_capacity(depth);

    for order in locator_orders(depth) {
        let candidates = find_local_extrema(y, order, comparator);
        trace!(order, candidates = candidates.len(), "local extremum candidates");

        let candidate_x: Vec<f64> = candidates.iter().map(|&i| x[i]).collect();
        // An order without candidates casts no vote.
        let Some(nearest) = nearest_index(&candidate_x, target_x) else {
            continue;
        };

        let refined = refine(x, y, level, candidates[nearest], comparator)?;
        debug!(order, x = x[refined], y = y[refined], "locator vote");
        votes.push(refined);
    }

    match vote(&votes, x, target_x) {
        Some(winner) => Ok(winner),
        None => {
            warn!(
                target_x,
                depth, "no local extremum at any order, using the global extremum"
            );
            comparator.best_index(y).ok_or(SweepError::EmptyInput)
        }
    }
}

/// Re-selects the true extremum between the coarse crossings around the
/// candidate at `index`.
fn refine(
    x: &[f64],
    y: &[f64],
    level: f64,
    index: usize,
    comparator: Comparator,
) -> AppResult<usize> {
    let filtered = Sample::new(x[index], y[index]);
    let (left, right) = crossings_at(x, y, level, filtered, index, false)?;

    // A right crossing on the very first sample leaves the interval open-ended.
    let lo = left.index;
    let hi = if right.index == 0 {
        x.len() - 1
    } else {
        right.index
    };

    Ok(comparator
        .best_index(&y[lo..=hi])
        .map_or(index, |offset| lo + offset))
}

/// Most frequently selected sample; ties go to the x nearest `target_x`,
/// then to the smaller x.
fn vote(votes: &[usize], x: &[f64], target_x: f64) -> Option<usize> {
    let mut tally: Vec<(usize, usize)> = Vec::new();
    for &v in votes {
        match tally.iter_mut().find(|(i, _)| *i == v) {
            Some((_, count)) => *count += 1,
            None => tally.push((v, 1)),
        }
    }

    let top = tally.iter().map(|&(_, count)| count).max()?;
    let mut modes: Vec<usize> = tally
        .into_iter()
        .filter(|&(_, count)| count == top)
        .map(|(i, _)| i)
        .collect();
    modes.sort_by(|&a, &b| x[a].total_cmp(&x[b]));

    let xs: Vec<f64> = modes.iter().map(|&i| x[i]).collect();
    nearest_index(&xs, target_x).map(|k| modes[k])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_orders() {
        assert_eq!(locator_orders(8), vec![1, 2, 5, 10, 20, 50, 100, 200]);
        assert_eq!(locator_orders(1), vec![1]);
        assert!(locator_orders(0).is_empty());
        assert_eq!(*locator_orders(80).last().unwrap(), usize::MAX);
    }

    #[test]
    fn test_find_local_maxima_by_order() {
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_eq!(find_local_extrema(&y, 1, Comparator::Greater), vec![1, 3]);
        assert_eq!(find_local_extrema(&y, 2, Comparator::Greater), vec![3]);
    }

    #[test]
    fn test_find_local_minima_includes_boundaries() {
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_eq!(find_local_extrema(&y, 1, Comparator::Less), vec![0, 2, 4]);
    }

    #[test]
    fn test_plateau_is_not_an_extremum() {
        let y = [0.0, 2.0, 2.0, 0.0];
        assert!(find_local_extrema(&y, 1, Comparator::Greater).is_empty());
    }

    #[test]
    fn test_find_local_extrema_degenerate() {
        assert!(find_local_extrema(&[], 1, Comparator::Greater).is_empty());
        assert!(find_local_extrema(&[1.0], 1, Comparator::Greater).is_empty());
        assert_eq!(find_local_extrema(&[2.0, 1.0], 5, Comparator::Greater), vec![0]);
    }

    #[test]
    fn test_global_extremum() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 9.0, -4.0];
        assert_eq!(
            global_extremum(&x, &y, Comparator::Greater),
            Some(Sample::new(1.0, 9.0))
        );
        assert_eq!(
            global_extremum(&x, &y, Comparator::Less),
            Some(Sample::new(2.0, -4.0))
        );
        assert_eq!(global_extremum(&[], &[], Comparator::Less), None);
    }

    #[test]
    fn test_vote_majority_wins() {
        let x = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(vote(&[1, 1, 3], &x, 3.0), Some(1));
    }

    #[test]
    fn test_vote_tie_goes_to_nearest_then_smallest() {
        let x = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(vote(&[3, 1], &x, 2.5), Some(3));
        assert_eq!(vote(&[3, 1], &x, 2.0), Some(1));
        assert_eq!(vote(&[], &x, 2.0), None);
    }

    #[test]
    fn test_locate_picks_peak_near_target() {
        let x: Vec<f64> = (0..9).map(f64::from).collect();
        let y = [0.0, 2.0, 4.0, 2.0, 0.0, 1.0, 3.0, 1.0, 0.0];
        let near_low = locate(&x, &y, 1.0, -1.0, 2, Comparator::Greater).unwrap();
        assert_eq!(near_low, Sample::new(2.0, 4.0));
        let near_high = locate(&x, &y, 7.0, -1.0, 2, Comparator::Greater).unwrap();
        assert_eq!(near_high, Sample::new(6.0, 3.0));
    }

    #[test]
    fn test_locate_refines_to_sample_peak() {
        // The order-1 candidate at x=1 sits on a shoulder of the real peak at x=3.
        let x: Vec<f64> = (0..7).map(f64::from).collect();
        let y = [0.0, 4.0, 3.9, 6.0, 2.0, 1.0, 0.0];
        let found = locate(&x, &y, 1.0, -3.0, 1, Comparator::Greater).unwrap();
        assert_eq!(found, Sample::new(3.0, 6.0));
    }

    #[test]
    fn test_locate_skips_orders_without_candidates() {
        // Order 1 finds x=1; order 2 finds nothing and must not vote for the
        // global maximum at x=3.
        let x: Vec<f64> = (0..5).map(f64::from).collect();
        let y = [0.0, 2.0, 1.0, 3.0, 3.0];
        assert_eq!(find_local_extrema(&y, 1, Comparator::Greater), vec![1]);
        assert!(find_local_extrema(&y, 2, Comparator::Greater).is_empty());

        let found = locate(&x, &y, 2.9, -0.5, 2, Comparator::Greater).unwrap();
        assert_eq!(found, Sample::new(1.0, 2.0));
    }

    #[test]
    fn test_locate_on_repeated_x_returns_the_peak_sample() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 3.0, 2.0];
        let found = locate(&x, &y, 5.0, -3.0, 3, Comparator::Greater).unwrap();
        assert_eq!(found, Sample::new(5.0, 3.0));
    }

    #[test]
    fn test_locate_falls_back_to_global_extremum() {
        let found = locate(&[4.0], &[2.0], 0.0, -3.0, 3, Comparator::Less).unwrap();
        assert_eq!(found, Sample::new(4.0, 2.0));
        let flat = locate(&[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0], 2.0, -3.0, 2, Comparator::Greater)
            .unwrap();
        assert_eq!(flat, Sample::new(0.0, 1.0));
    }

    #[test]
    fn test_locate_rejects_zero_depth_and_empty_input() {
        assert!(matches!(
            locate(&[0.0], &[0.0], 0.0, -3.0, 0, Comparator::Greater),
            Err(SweepError::InvalidDepth)
        ));
        assert!(matches!(
            locate(&[], &[], 0.0, -3.0, 1, Comparator::Greater),
            Err(SweepError::EmptyInput)
        ));
    }
}
