//! Frozen-tick state.

/// Pinned tick plus the game time that has accumulated since pinning.
///
/// While active, the main clock is held and slow motion, capture and
/// forward skips feed the accumulator instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrozenTickState {
    pinned: Option<u32>,
    accumulated: i32,
}

impl FrozenTickState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned(&self) -> Option<u32> {
        self.pinned
    }

    /// Milliseconds fed since the tick was pinned.
    pub fn accumulated(&self) -> i32 {
        self.accumulated
    }

    /// Game time being shown: the pin moved by the accumulator.
    pub fn frozen_time(&self) -> Option<u32> {
        self.pinned.map(|tick| tick.saturating_add_signed(self.accumulated))
    }

    /// Turn off if active, otherwise pin at `pin` (or `current_tick`) with an
    /// empty accumulator.
    pub fn toggle(&mut self, pin: Option<u32>, current_tick: u32) {
        self.accumulated = 0;
        self.pinned = match self.pinned {
            Some(_) => None,
            None => Some(pin.unwrap_or(current_tick)),
        };
    }

    /// Feed `msec` into the accumulator. Nothing accumulates while paused.
    pub fn update(&mut self, paused: bool, msec: i32) {
        if self.pinned.is_none() || paused {
            return;
        }
        self.accumulated = self.accumulated.saturating_add(msec);
    }
}
