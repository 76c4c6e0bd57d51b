//! Common test utilities for sweep_analysis integration tests
//!
//! This module provides reusable test helpers for:
//! - Floating point assertions with a named tolerance
//! - Synthetic sweep generation (resonance peaks, dips, spikes)

#![allow(dead_code)] // Utilities may not all be used by every test binary

/// Default absolute tolerance for coordinate comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Assert that `actual` is within `tolerance` of `expected`.
///
/// # Panics
/// Panics if `actual` is `None` or outside the tolerance.
pub fn assert_close(actual: Option<f64>, expected: f64, tolerance: f64, context: &str) {
    let actual = actual.unwrap_or_else(|| panic!("{context}: value is undetermined"));
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: expected {} ±{}, got {}",
        context,
        expected,
        tolerance,
        actual
    );
}

/// Evenly spaced axis `start, start + step, ...` with `n` samples.
pub fn axis(n: usize, start: f64, step: f64) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Gaussian peak sampled on `x`.
pub fn gaussian(x: &[f64], centre: f64, sigma: f64, height: f64) -> Vec<f64> {
    x.iter()
        .map(|&v| height * (-((v - centre).powi(2)) / (2.0 * sigma * sigma)).exp())
        .collect()
}

/// Sum of two equally long curves.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(p, q)| p + q).collect()
}
