//! Cursor over the current duty-cycle pattern.

use crate::duty_cycle::{call_rate, generate_pattern, PATTERN_SIZE};

/// Configuration observed for one slow-motion frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockInputs {
    /// `timescale` dvar
    pub timescale: f32,
    /// `com_maxfps` dvar; 0 or below means uncapped
    pub max_fps: i32,
    /// Measured render frame rate
    pub frame_rate: f32,
}

/// Slow-motion pattern state, owned by the scheduler.
///
/// The pattern is rebuilt once per full cycle so it follows frame-rate drift,
/// and immediately whenever the timescale or frame-rate cap changes.
#[derive(Clone, Debug)]
pub struct PlaybackClockState {
    pattern: [u8; PATTERN_SIZE],
    /// Next step to hand out (wraps at `PATTERN_SIZE`).
    cursor: usize,
    last_scale: f32,
    last_max_fps: i32,
    /// False until the first `advance` records its inputs.
    seeded: bool,
    generations: u64,
}

impl PlaybackClockState {
    pub fn new() -> Self {
        Self {
            pattern: [0; PATTERN_SIZE],
            cursor: 0,
            last_scale: 1.0,
            last_max_fps: 0,
            seeded: false,
            generations: 0,
        }
    }

    /// Milliseconds (0 or 1) to advance this frame. Call once per frame.
    pub fn advance(&mut self, inputs: ClockInputs) -> i32 {
        if !self.seeded {
            self.last_scale = inputs.timescale;
            self.last_max_fps = inputs.max_fps;
            self.seeded = true;
        }

        if self.last_scale != inputs.timescale || self.last_max_fps != inputs.max_fps {
            let frame_rate = self.transition_frame_rate(&inputs);
            self.last_scale = inputs.timescale;
            self.last_max_fps = inputs.max_fps;
            self.cursor = 0;
            self.regenerate(frame_rate, inputs.timescale);
        } else if self.cursor == 0 {
            self.regenerate(inputs.frame_rate, inputs.timescale);
        }

        let step = self.pattern[self.cursor];
        self.cursor = (self.cursor + 1) % PATTERN_SIZE;
        step as i32
    }

    /// Frame rate to build the pattern from right after a config change.
    ///
    /// The measured rate lags behind a cap change: after lowering the cap it
    /// still reads too high, after raising it too low.
    fn transition_frame_rate(&self, inputs: &ClockInputs) -> f32 {
        let cap = inputs.max_fps;
        if cap <= 0 {
            return inputs.frame_rate;
        }
        if self.last_max_fps <= 0 || self.last_max_fps > cap {
            inputs.frame_rate.min(cap as f32)
        } else if self.last_max_fps < cap {
            inputs.frame_rate.max(cap as f32)
        } else {
            inputs.frame_rate
        }
    }

    fn regenerate(&mut self, frame_rate: f32, timescale: f32) {
        let calls = call_rate(frame_rate, timescale);
        let ones = generate_pattern(&mut self.pattern, calls);
        self.generations += 1;
        tracing::trace!(frame_rate, timescale, calls, ones, "regenerated playback pattern");
    }

    /// Current pattern.
    pub fn pattern(&self) -> &[u8; PATTERN_SIZE] {
        &self.pattern
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// How many times the pattern has been rebuilt.
    pub fn generations(&self) -> u64 {
        self.generations
    }
}

impl Default for PlaybackClockState {
    fn default() -> Self {
        Self::new()
    }
}
