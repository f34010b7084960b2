//! Fixed-rate video capture pacing.

use std::num::NonZeroU32;

/// A capture running at a fixed output frame rate.
///
/// Each rendered frame covers `1000 / fps` game milliseconds; the fractional
/// part is carried so 60 fps yields 16, 17, 17, ... and never drifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureSession {
    fps: NonZeroU32,
    /// Remainder carried between frames, in units of 1/fps ms.
    carry: u32,
    frames: u64,
}

impl CaptureSession {
    pub fn new(fps: NonZeroU32) -> Self {
        Self {
            fps,
            carry: 0,
            frames: 0,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps.get()
    }

    /// Frames captured so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Game milliseconds for the next captured frame.
    pub fn next_frame_msec(&mut self) -> i32 {
        let fps = self.fps.get();
        let total = 1000 + self.carry;
        self.carry = total % fps;
        self.frames += 1;
        (total / fps) as i32
    }
}
