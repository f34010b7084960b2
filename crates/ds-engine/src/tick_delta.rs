//! Signed tick offsets: forward skips and rewind dispatch.

use crate::host::PlaybackHost;
use crate::transport::Transport;

/// Negative offsets this small are ignored unless explicitly requested.
pub const REWIND_DEADZONE: i32 = 5;

/// What a signed tick delta turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickDeltaAction {
    /// Host realtime moved forward
    SkippedForward(i32),
    /// Frozen-tick accumulator took the offset
    FrozenAbsorbed(i32),
    /// Handed to the rewind engine
    Rewound(i32),
    /// Inside the deadzone, or zero
    Ignored,
}

/// Applies signed tick offsets coming from the UI scrubber and demo import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickDeltaController {
    deadzone: i32,
}

impl TickDeltaController {
    pub fn new(deadzone: i32) -> Self {
        Self {
            deadzone: deadzone.max(0),
        }
    }

    pub fn deadzone(&self) -> i32 {
        self.deadzone
    }

    /// Move forward by `ticks`. While a frozen tick is active the accumulator
    /// takes the offset instead, unless `ignore_frozen_tick` is set.
    pub fn skip_forward<H: PlaybackHost + ?Sized>(
        &self,
        host: &mut H,
        ticks: i32,
        ignore_frozen_tick: bool,
    ) -> TickDeltaAction {
        if !ignore_frozen_tick && host.frozen_tick().is_some() {
            host.update_frozen_tick(false, ticks);
            return TickDeltaAction::FrozenAbsorbed(ticks);
        }

        host.skip_realtime(ticks);
        tracing::debug!(ticks, tick = host.demo_info().current_tick, "skipped forward");
        TickDeltaAction::SkippedForward(ticks)
    }

    /// Apply a signed offset: forward skips directly, backward goes to the
    /// rewind engine once past the deadzone (or always, with
    /// `ignore_deadzone`).
    pub fn apply_signed_delta<H: PlaybackHost + ?Sized>(
        &self,
        host: &mut H,
        ticks: i32,
        ignore_deadzone: bool,
    ) -> TickDeltaAction {
        if ticks > 0 {
            self.skip_forward(host, ticks, false)
        } else if ticks < -self.deadzone || (ticks < 0 && ignore_deadzone) {
            tracing::debug!(ticks, "rewinding");
            host.rewind_by(ticks);
            TickDeltaAction::Rewound(ticks)
        } else {
            TickDeltaAction::Ignored
        }
    }

    /// Bring frozen-tick state in line with an imported value.
    ///
    /// With no imported value an active frozen tick is switched off. With
    /// one, the real game state is moved to it, the frozen tick is pinned
    /// there with its accumulator holding the same offset, and playback is
    /// paused.
    pub fn handle_imported_frozen_tick<H: PlaybackHost + ?Sized>(
        &self,
        host: &mut H,
        transport: &mut Transport,
        desired: Option<u32>,
    ) {
        let info = host.demo_info();

        let Some(desired) = desired else {
            if info.frozen_tick.is_some() {
                host.toggle_frozen_tick(None);
                tracing::debug!("imported state has no frozen tick, disabled");
            }
            return;
        };

        // off first, or the offset lands in the accumulator instead of the game
        if info.frozen_tick.is_some() {
            host.toggle_frozen_tick(None);
        }

        let delta = info.ticks_until(desired);
        self.apply_signed_delta(host, delta, true);

        host.toggle_frozen_tick(Some(desired));
        host.update_frozen_tick(false, delta);

        if !transport.is_paused() {
            transport.toggle_paused();
        }
        tracing::debug!(desired, delta, "imported frozen tick");
    }
}

impl Default for TickDeltaController {
    fn default() -> Self {
        Self::new(REWIND_DEADZONE)
    }
}
