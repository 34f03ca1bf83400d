//! Analysis window and per-bin center frequencies.
//!
//! The vocoder applies a single square-root-Hann window twice per frame
//! (before the forward transform and after the inverse), so the effective
//! overlap-add window is a Hann window. The sum of the squared coefficients
//! is the overlap-add normalization reference.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::math::bin_omega;
use core::f32::consts::TAU;
use libm::{cosf, sqrtf};

/// Precomputed window coefficients and bin center frequencies for one transform size.
///
/// Immutable once built; rebuild on reconfiguration.
#[derive(Debug, Clone)]
pub struct AnalysisWindow {
    coefficients: Vec<f32>,
    center_freqs: Vec<f32>,
    sum_of_squares: f32,
}

impl AnalysisWindow {
    /// Builds the square-root-Hann window for an `size`-point transform:
    /// `w[n] = sqrt(0.5 * (1 - cos(2πn / (size - 1))))`,
    /// plus `size / 2 + 1` center frequencies `ω_k = 2πk / size`.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn sqrt_hann(size: usize) -> Self {
        assert!(size >= 2, "window size must be at least 2");

        let denom = (size - 1) as f32;
        let coefficients: Vec<f32> = (0..size)
            .map(|n| sqrtf(0.5 * (1.0 - cosf(TAU * n as f32 / denom))))
            .collect();
        let sum_of_squares = coefficients.iter().map(|w| w * w).sum();
        let center_freqs = (0..=size / 2).map(|k| bin_omega(k, size)).collect();

        Self {
            coefficients,
            center_freqs,
            sum_of_squares,
        }
    }

    /// Window length in samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always false; a window has at least two coefficients.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Window coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Center angular frequency of each non-negative bin, radians/sample.
    #[inline]
    pub fn center_freqs(&self) -> &[f32] {
        &self.center_freqs
    }

    /// Sum of squared coefficients.
    #[inline]
    pub fn sum_of_squares(&self) -> f32 {
        self.sum_of_squares
    }
}
