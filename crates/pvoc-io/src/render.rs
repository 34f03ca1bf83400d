//! Whole-buffer rendering through a vocoder engine.

use pvoc_spectral::VocoderEngine;

/// Block size used when none is given, in frames.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Runs interleaved audio through a [`VocoderEngine`] the way a host callback
/// would: fixed-size blocks, in order, in place.
///
/// With latency compensation on (the default), the engine is fed
/// [`latency_samples`](VocoderEngine::latency_samples) extra frames of
/// silence and the same number of leading output frames are dropped, so the
/// result lines up with the input and has the same length.
#[derive(Debug, Clone, Copy)]
pub struct OfflineRenderer {
    block_size: usize,
    compensate_latency: bool,
}

impl Default for OfflineRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

impl OfflineRenderer {
    /// Renderer with the given block size in frames (at least 1).
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            compensate_latency: true,
        }
    }

    /// Enables or disables latency compensation.
    pub fn with_latency_compensation(mut self, enabled: bool) -> Self {
        self.compensate_latency = enabled;
        self
    }

    /// Block size in frames.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Renders `input` and returns the processed samples.
    pub fn render(&self, engine: &mut VocoderEngine, input: &[f32]) -> Vec<f32> {
        self.render_with_progress(engine, input, |_, _| {})
    }

    /// Renders `input`, calling `progress(done, total)` in frames after every block.
    ///
    /// A trailing partial frame in `input` is dropped.
    pub fn render_with_progress<F>(
        &self,
        engine: &mut VocoderEngine,
        input: &[f32],
        mut progress: F,
    ) -> Vec<f32>
    where
        F: FnMut(usize, usize),
    {
        let channels = engine.channels();
        let frames = input.len() / channels;
        let latency = if self.compensate_latency {
            engine.latency_samples()
        } else {
            0
        };

        let total = frames + latency;
        let mut buffer = vec![0.0f32; total * channels];
        buffer[..frames * channels].copy_from_slice(&input[..frames * channels]);

        tracing::debug!(
            frames,
            channels,
            latency,
            block_size = self.block_size,
            "rendering"
        );

        let mut done = 0;
        for block in buffer.chunks_mut(self.block_size * channels) {
            engine.process_interleaved(block);
            done += block.len() / channels;
            progress(done, total);
        }

        buffer.drain(..latency * channels);
        buffer
    }
}
