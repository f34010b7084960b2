//! Per-frame scheduling results.

/// How the scheduler treated a frame.
///
/// Derived fresh every frame, never stored as state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    /// An exact-position skip already moved the game this frame
    SkipForward,
    /// Capture drives the frozen-tick accumulator
    CapturingFrozen,
    /// Capture drives the main clock at its output frame rate
    Capturing,
    /// A rewind is being reconstructed; poll again shortly
    RewindingWait,
    /// Playback paused
    Paused,
    /// Host delta passed through unchanged
    FastForwardDirect,
    /// Host delta redirected into the frozen-tick accumulator
    FrozenFastForward,
    /// Slow motion from the duty-cycle pattern
    PatternDriven,
    /// Slow motion into the frozen-tick accumulator
    FrozenPatternDriven,
}

impl PlaybackMode {
    /// Whether the frame's time went to the frozen-tick accumulator.
    pub fn is_frozen(self) -> bool {
        matches!(
            self,
            PlaybackMode::CapturingFrozen
                | PlaybackMode::FrozenFastForward
                | PlaybackMode::FrozenPatternDriven
        )
    }
}

/// Where a frame's milliseconds go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDelta {
    /// Advance the main game clock by this many milliseconds
    Direct(i32),
    /// Feed the frozen-tick accumulator; the main clock gets 0
    FrozenWrite { msec: i32, paused: bool },
}

impl FrameDelta {
    /// Milliseconds the main clock advances by.
    pub fn direct_msec(self) -> i32 {
        match self {
            FrameDelta::Direct(msec) => msec,
            FrameDelta::FrozenWrite { .. } => 0,
        }
    }
}

/// The scheduler's answer for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDecision {
    pub mode: PlaybackMode,
    pub delta: FrameDelta,
}

impl FrameDecision {
    pub const fn new(mode: PlaybackMode, delta: FrameDelta) -> Self {
        Self { mode, delta }
    }
}
