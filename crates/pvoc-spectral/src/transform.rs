//! Forward/inverse spectral transform for real frames.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Planned forward and inverse FFTs of one fixed size.
///
/// Frames are complex buffers of exactly [`size`](Self::size) values holding a
/// real signal. [`forward`](Self::forward) leaves bins `0..=size/2` meaningful;
/// [`inverse`](Self::inverse) reads only those bins, rebuilds the negative
/// frequencies by conjugate symmetry, and scales by `1 / size` so a
/// forward/inverse pair is the identity.
///
/// Scratch space is allocated at construction; both directions run without
/// allocating.
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    size: usize,
}

impl SpectralTransform {
    /// Plans transforms for `size`-point frames.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "transform size must be > 0");

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);
        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(ifft.get_inplace_scratch_len());

        Self {
            fft,
            ifft,
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            size,
        }
    }

    /// Transform size N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative frequency bins, `N / 2 + 1`.
    #[inline]
    pub fn bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Forward transform in place.
    pub fn forward(&mut self, frame: &mut [Complex<f32>]) {
        debug_assert_eq!(frame.len(), self.size);
        self.fft.process_with_scratch(frame, &mut self.scratch);
    }

    /// Inverse transform in place from the non-negative bins.
    ///
    /// Bins above `N / 2` are overwritten with the conjugates of their mirror
    /// images before transforming; the result is scaled by `1 / N`.
    pub fn inverse(&mut self, frame: &mut [Complex<f32>]) {
        debug_assert_eq!(frame.len(), self.size);
        let n = self.size;
        for k in 1..n.div_ceil(2) {
            frame[n - k] = frame[k].conj();
        }

        self.ifft.process_with_scratch(frame, &mut self.scratch);

        let scale = 1.0 / n as f32;
        for c in frame.iter_mut() {
            *c *= scale;
        }
    }
}

impl core::fmt::Debug for SpectralTransform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpectralTransform")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
