//! Multi-channel audio block views.
//!
//! Hosts hand audio to a processor either planar (one slice per channel) or
//! interleaved (frames of `channels` consecutive samples). [`AudioBlock`]
//! abstracts over both so processors can work in place on whatever layout
//! the host provides, without copying into an intermediate buffer.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// In-place, multi-channel sample access.
///
/// `frames()` is the number of samples per channel. Reads and writes outside
/// `0..channels()` x `0..frames()` are a logic error.
pub trait AudioBlock {
    /// Number of channels in the block.
    fn channels(&self) -> usize;

    /// Number of samples per channel.
    fn frames(&self) -> usize;

    /// Reads one sample.
    fn sample(&self, channel: usize, frame: usize) -> f32;

    /// Overwrites one sample.
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32);
}

/// Planar view: one mutable slice per channel.
///
/// Ragged input is truncated to the shortest channel.
///
/// ```rust
/// use pvoc_core::{AudioBlock, PlanarBlock};
///
/// let mut left = [0.1, 0.2, 0.3];
/// let mut right = [0.4, 0.5];
/// let mut chans = [&mut left[..], &mut right[..]];
/// let block = PlanarBlock::new(&mut chans);
/// assert_eq!(block.channels(), 2);
/// assert_eq!(block.frames(), 2);
/// ```
pub struct PlanarBlock<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    frames: usize,
}

impl<'a, 'b> PlanarBlock<'a, 'b> {
    /// Wraps per-channel slices.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> Self {
        let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        Self { channels, frames }
    }
}

impl AudioBlock for PlanarBlock<'_, '_> {
    #[inline]
    fn channels(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    fn frames(&self) -> usize {
        self.frames
    }

    #[inline]
    fn sample(&self, channel: usize, frame: usize) -> f32 {
        self.channels[channel][frame]
    }

    #[inline]
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32) {
        self.channels[channel][frame] = value;
    }
}

/// Interleaved view: `[c0, c1, .., c0, c1, ..]`.
///
/// A trailing partial frame is ignored.
///
/// ```rust
/// use pvoc_core::{AudioBlock, InterleavedBlock};
///
/// let mut data = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let block = InterleavedBlock::new(&mut data, 2);
/// assert_eq!(block.frames(), 2);
/// assert_eq!(block.sample(1, 1), 3.0);
/// ```
pub struct InterleavedBlock<'a> {
    data: &'a mut [f32],
    channels: usize,
}

impl<'a> InterleavedBlock<'a> {
    /// Wraps interleaved samples with the given channel count.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is 0.
    pub fn new(data: &'a mut [f32], channels: usize) -> Self {
        assert!(channels > 0, "interleaved block needs at least one channel");
        Self { data, channels }
    }
}

impl AudioBlock for InterleavedBlock<'_> {
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn frames(&self) -> usize {
        self.data.len() / self.channels
    }

    #[inline]
    fn sample(&self, channel: usize, frame: usize) -> f32 {
        self.data[frame * self.channels + channel]
    }

    #[inline]
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32) {
        self.data[frame * self.channels + channel] = value;
    }
}

/// Owned planar buffers, one `Vec` per channel.
impl AudioBlock for [Vec<f32>] {
    #[inline]
    fn channels(&self) -> usize {
        self.len()
    }

    fn frames(&self) -> usize {
        self.iter().map(Vec::len).min().unwrap_or(0)
    }

    #[inline]
    fn sample(&self, channel: usize, frame: usize) -> f32 {
        self[channel][frame]
    }

    #[inline]
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32) {
        self[channel][frame] = value;
    }
}
