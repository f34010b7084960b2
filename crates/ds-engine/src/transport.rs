//! Pause state.

/// Transport controls for demo playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transport {
    paused: bool,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip pause; returns the new state.
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}
