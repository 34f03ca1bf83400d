//! Duration-correcting frame resampler.
//!
//! Pitch-shift mode scales every bin's phase advance by the pitch ratio `r`,
//! which produces frames whose content is phase-coherent with a synthesis hop
//! of `r · H_a`. Squeezing each N-sample frame to `floor(N / r)` samples maps
//! that hop back onto `H_a`, so the output keeps the input's tempo while its
//! frequencies are scaled by `r`.

use pvoc_core::lerp;

/// Number of samples an N-sample frame occupies after resampling by `ratio`.
#[inline]
pub fn resampled_len(frame_len: usize, ratio: f32) -> usize {
    (frame_len as f64 / f64::from(ratio)).floor() as usize
}

/// Resamples `frame` to [`resampled_len`]`(frame.len(), ratio)` samples by
/// linear interpolation and writes them to the front of `out`.
///
/// Output sample `n` reads position `n · N / len` of the input; the right-hand
/// neighbour of the last input sample wraps to index 0. Returns the number of
/// samples written; output past `out.len()` is dropped.
///
/// ```rust
/// use pvoc_spectral::resample_frame;
///
/// let frame = [0.0, 1.0, 2.0, 3.0];
/// let mut out = [0.0; 8];
/// let len = resample_frame(&frame, 0.5, &mut out);
/// assert_eq!(len, 8);
/// assert_eq!(&out[..4], &[0.0, 0.5, 1.0, 1.5]);
/// ```
pub fn resample_frame(frame: &[f32], ratio: f32, out: &mut [f32]) -> usize {
    let n = frame.len();
    if n == 0 {
        return 0;
    }

    let full_len = resampled_len(n, ratio);
    if full_len == 0 {
        return 0;
    }

    let step = n as f64 / full_len as f64;
    let len = full_len.min(out.len());
    for (i, slot) in out[..len].iter_mut().enumerate() {
        let x = i as f64 * step;
        let ix = x.floor() as usize;
        let frac = (x - ix as f64) as f32;
        *slot = lerp(frame[ix % n], frame[(ix + 1) % n], frac);
    }
    len
}
