//! Multi-channel circular sample store.
//!
//! [`RingBuffer`] holds a fixed number of samples per channel and two shared
//! cursors. It serves both ends of the vocoder: input staging (samples are
//! written at the write cursor and read as analysis frames relative to the
//! read cursor) and overlap-add output (frames are accumulated relative to the
//! write cursor and drained one frame at a time from the read cursor).
//!
//! # Memory
//!
//! Storage is allocated once in [`RingBuffer::new`] and never grows. All
//! indexing is modulo the capacity, so any offset is valid; callers are
//! responsible for sizing the capacity so that live data is never overwritten.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Fixed-capacity, multi-channel circular buffer with shared read/write cursors.
///
/// Samples are stored channel-major in a single flat allocation. Both cursors
/// are shared by all channels: write every channel of a frame, then advance.
///
/// # Example
///
/// ```rust
/// use pvoc_core::RingBuffer;
///
/// let mut ring = RingBuffer::new(2, 8);
/// ring.write(0, 0.25);
/// ring.write(1, -0.25);
/// ring.advance_write(1);
///
/// assert_eq!(ring.read_at(0, 0), 0.25);
/// assert_eq!(ring.take(1), -0.25);
/// assert_eq!(ring.read_at(1, 0), 0.0); // take() zeroes the slot
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<f32>,
    channels: usize,
    capacity: usize,
    read_pos: usize,
    write_pos: usize,
}

impl RingBuffer {
    /// Creates a zeroed ring with `channels` lanes of `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `channels` or `capacity` is 0.
    pub fn new(channels: usize, capacity: usize) -> Self {
        assert!(channels > 0, "RingBuffer needs at least one channel");
        assert!(capacity > 0, "RingBuffer capacity must be > 0");

        Self {
            data: vec![0.0; channels * capacity],
            channels,
            capacity,
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples per channel.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current read cursor.
    #[inline]
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// Current write cursor.
    #[inline]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Number of positions the write cursor leads the read cursor by.
    #[inline]
    pub fn lead(&self) -> usize {
        (self.write_pos + self.capacity - self.read_pos) % self.capacity
    }

    /// Places both cursors. Positions are taken modulo the capacity.
    pub fn set_cursors(&mut self, read_pos: usize, write_pos: usize) {
        self.read_pos = read_pos % self.capacity;
        self.write_pos = write_pos % self.capacity;
    }

    #[inline]
    fn index(&self, channel: usize, pos: usize) -> usize {
        debug_assert!(channel < self.channels);
        channel * self.capacity + pos % self.capacity
    }

    /// Stores `sample` for `channel` at the write cursor.
    ///
    /// Does not move the cursor; call [`advance_write`](Self::advance_write)
    /// once every channel of the frame has been written.
    #[inline]
    pub fn write(&mut self, channel: usize, sample: f32) {
        let idx = self.index(channel, self.write_pos);
        self.data[idx] = sample;
    }

    /// Adds `value` to the slot `offset` positions past the write cursor.
    #[inline]
    pub fn accumulate_at(&mut self, channel: usize, offset: usize, value: f32) {
        let idx = self.index(channel, self.write_pos + offset % self.capacity);
        self.data[idx] += value;
    }

    /// Moves the write cursor forward by `n`.
    #[inline]
    pub fn advance_write(&mut self, n: usize) {
        self.write_pos = (self.write_pos + n % self.capacity) % self.capacity;
    }

    /// Returns the sample `offset` positions past the read cursor.
    #[inline]
    pub fn read_at(&self, channel: usize, offset: usize) -> f32 {
        self.data[self.index(channel, self.read_pos + offset % self.capacity)]
    }

    /// Returns the sample at the read cursor and zeroes its slot.
    ///
    /// Used for overlap-add delivery: a drained slot must be silent before the
    /// next synthesis frame accumulates into it.
    #[inline]
    pub fn take(&mut self, channel: usize) -> f32 {
        let idx = self.index(channel, self.read_pos);
        core::mem::take(&mut self.data[idx])
    }

    /// Moves the read cursor forward by `n`.
    #[inline]
    pub fn advance_read(&mut self, n: usize) {
        self.read_pos = (self.read_pos + n % self.capacity) % self.capacity;
    }

    /// Immutable view of one channel's storage, in slot order.
    pub fn channel(&self, channel: usize) -> &[f32] {
        let start = channel * self.capacity;
        &self.data[start..start + self.capacity]
    }

    /// Zeroes all samples and resets both cursors to 0.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.read_pos = 0;
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_wraps() {
        let mut ring = RingBuffer::new(1, 4);
        for i in 0..6 {
            ring.write(0, i as f32);
            ring.advance_write(1);
        }
        // Slots hold [4, 5, 2, 3]; read cursor still at 0
        assert_eq!(ring.read_at(0, 0), 4.0);
        assert_eq!(ring.read_at(0, 1), 5.0);
        assert_eq!(ring.read_at(0, 2), 2.0);
        assert_eq!(ring.read_at(0, 7), 3.0);
    }

    #[test]
    fn channels_are_independent() {
        let mut ring = RingBuffer::new(3, 5);
        for ch in 0..3 {
            ring.write(ch, ch as f32 + 1.0);
        }
        ring.advance_write(1);
        assert_eq!(ring.read_at(0, 0), 1.0);
        assert_eq!(ring.read_at(1, 0), 2.0);
        assert_eq!(ring.read_at(2, 0), 3.0);
        assert_eq!(ring.channel(1)[0], 2.0);
    }

    #[test]
    fn accumulate_then_take_zeroes() {
        let mut ring = RingBuffer::new(1, 8);
        ring.set_cursors(6, 6);
        ring.accumulate_at(0, 0, 0.5);
        ring.accumulate_at(0, 0, 0.25);
        ring.accumulate_at(0, 3, 1.0); // lands on slot 1

        assert_eq!(ring.take(0), 0.75);
        assert_eq!(ring.read_at(0, 0), 0.0);
        ring.advance_read(3);
        assert_eq!(ring.read_pos(), 1);
        assert_eq!(ring.take(0), 1.0);
    }

    #[test]
    fn lead_tracks_cursor_distance() {
        let mut ring = RingBuffer::new(1, 16);
        ring.set_cursors(12, 4);
        assert_eq!(ring.lead(), 8);
        ring.advance_write(5);
        assert_eq!(ring.lead(), 13);
        ring.advance_read(13);
        assert_eq!(ring.lead(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut ring = RingBuffer::new(2, 4);
        ring.set_cursors(1, 3);
        ring.write(1, 9.0);
        ring.clear();
        assert_eq!(ring.read_pos(), 0);
        assert_eq!(ring.write_pos(), 0);
        assert!(ring.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    #[should_panic]
    fn zero_capacity_panics() {
        let _ = RingBuffer::new(1, 0);
    }
}
