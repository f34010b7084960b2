//! Smoothed render frame rate.

use heapless::HistoryBuffer;

use crate::host::FrameClock;

/// Frames averaged over.
const WINDOW: usize = 60;

/// Rolling-average frame rate over the last [`WINDOW`] frames.
///
/// A single instantaneous frame time is too noisy to build a slow-motion
/// pattern from; this is what the host's "measured frame rate" reads.
#[derive(Clone, Debug)]
pub struct FrameRateMeter {
    frame_times: HistoryBuffer<f32, WINDOW>,
    total: f32,
}

impl FrameRateMeter {
    pub fn new() -> Self {
        Self {
            frame_times: HistoryBuffer::new(),
            total: 0.0,
        }
    }

    /// Record one real frame's duration in seconds. Non-positive and
    /// non-finite durations are dropped.
    pub fn record(&mut self, frame_seconds: f32) {
        if !frame_seconds.is_finite() || frame_seconds <= 0.0 {
            return;
        }
        self.frame_times.write(frame_seconds);
        // re-summed rather than updated incrementally to avoid float drift
        self.total = self.frame_times.as_slice().iter().sum();
    }

    /// Frames per second, or 0 before the first frame.
    pub fn frame_rate(&self) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f32 / self.total
    }

    pub fn clear(&mut self) {
        self.frame_times.clear();
        self.total = 0.0;
    }
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for FrameRateMeter {
    fn frame_rate(&self) -> f32 {
        FrameRateMeter::frame_rate(self)
    }
}
