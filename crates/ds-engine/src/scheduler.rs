//! Per-frame playback delta policy.
//!
//! Once per rendered frame the host asks how many milliseconds of demo time
//! to advance. Hard overrides (exact-seek skip, capture, rewind, pause) win
//! first; after that the host's own delta is used unless the timescale is
//! below 1.0 and the frame is too short to advance even 1ms, in which case
//! the duty-cycle pattern decides.
//!
//! The scheduler never writes the frozen-tick accumulator itself. It returns
//! a [`FrameDecision`] and the caller applies it with [`apply_frame_delta`].

use ds_ir::{FrameDecision, FrameDelta, PlaybackMode, COM_MAXFPS, TIMESCALE};

use crate::clock_state::{ClockInputs, PlaybackClockState};
use crate::host::{FrozenTick, PlaybackHost};

/// Milliseconds returned while a rewind is being reconstructed.
pub const REWIND_WAIT_MSEC: i32 = 50;

/// Tunables for [`PlaybackDeltaScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Returned every frame while a rewind is in flight. Not game time: it
    /// paces polling so low timescales don't stall the rewind from starting.
    pub rewind_wait_msec: i32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            rewind_wait_msec: REWIND_WAIT_MSEC,
        }
    }
}

/// Decides each frame's millisecond advance.
#[derive(Clone, Debug, Default)]
pub struct PlaybackDeltaScheduler {
    config: SchedulerConfig,
    clock: PlaybackClockState,
    last_mode: Option<PlaybackMode>,
}

impl PlaybackDeltaScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            clock: PlaybackClockState::new(),
            last_mode: None,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Slow-motion pattern state.
    pub fn clock(&self) -> &PlaybackClockState {
        &self.clock
    }

    /// Mode chosen on the most recent frame.
    pub fn last_mode(&self) -> Option<PlaybackMode> {
        self.last_mode
    }

    /// Decide this frame's advance. `game_msec` is the host's own delta for
    /// the frame; `paused` is the transport state.
    pub fn compute_delta<H: PlaybackHost + ?Sized>(
        &mut self,
        host: &mut H,
        paused: bool,
        game_msec: i32,
    ) -> FrameDecision {
        let decision = self.decide(host, paused, game_msec);
        if self.last_mode != Some(decision.mode) {
            tracing::debug!(mode = ?decision.mode, game_msec, "playback mode changed");
            self.last_mode = Some(decision.mode);
        }
        decision
    }

    fn decide<H: PlaybackHost + ?Sized>(
        &mut self,
        host: &mut H,
        paused: bool,
        game_msec: i32,
    ) -> FrameDecision {
        let frozen = host.frozen_tick().is_some();

        // exact-position seek already moved the game this frame
        if !frozen && host.check_skip_forward() {
            return FrameDecision::new(PlaybackMode::SkipForward, FrameDelta::Direct(0));
        }

        if host.is_capturing() {
            let msec = host.on_game_frame();
            return if frozen {
                FrameDecision::new(
                    PlaybackMode::CapturingFrozen,
                    FrameDelta::FrozenWrite { msec, paused: false },
                )
            } else {
                FrameDecision::new(PlaybackMode::Capturing, FrameDelta::Direct(msec))
            };
        }

        if !frozen && host.is_rewinding() {
            return FrameDecision::new(
                PlaybackMode::RewindingWait,
                FrameDelta::Direct(self.config.rewind_wait_msec),
            );
        }

        if !frozen && paused {
            return FrameDecision::new(PlaybackMode::Paused, FrameDelta::Direct(0));
        }

        // NaN fails `< 1.0` and falls through to the unscaled delta too
        let timescale = match host.dvar(TIMESCALE) {
            Some(v) if game_msec <= 1 && v.floating_point < 1.0 => v.floating_point,
            _ => return unscaled(game_msec, frozen, paused),
        };

        let Some(max_fps) = host.dvar(COM_MAXFPS) else {
            return unscaled(game_msec, frozen, paused);
        };

        let msec = self.clock.advance(ClockInputs {
            timescale,
            max_fps: max_fps.int32,
            frame_rate: host.frame_rate(),
        });

        if frozen {
            FrameDecision::new(
                PlaybackMode::FrozenPatternDriven,
                FrameDelta::FrozenWrite { msec, paused },
            )
        } else {
            FrameDecision::new(PlaybackMode::PatternDriven, FrameDelta::Direct(msec))
        }
    }
}

/// Host delta as-is; 1ms pattern resolution isn't needed.
fn unscaled(game_msec: i32, frozen: bool, paused: bool) -> FrameDecision {
    if frozen {
        FrameDecision::new(
            PlaybackMode::FrozenFastForward,
            FrameDelta::FrozenWrite { msec: game_msec, paused },
        )
    } else {
        FrameDecision::new(PlaybackMode::FastForwardDirect, FrameDelta::Direct(game_msec))
    }
}

/// Apply a frame's delta. Frozen writes go to the accumulator; returns the
/// milliseconds for the main clock.
pub fn apply_frame_delta<F: FrozenTick + ?Sized>(delta: FrameDelta, frozen: &mut F) -> i32 {
    match delta {
        FrameDelta::Direct(msec) => msec,
        FrameDelta::FrozenWrite { msec, paused } => {
            frozen.update_frozen_tick(paused, msec);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duty_cycle::PATTERN_SIZE;
    use crate::host::{Capture, DemoClock, DvarLookup, FrameClock, Rewind};
    use ds_ir::{DemoInfo, DvarValue};

    #[derive(Default)]
    struct MockHost {
        frozen: Option<u32>,
        frozen_writes: Vec<(bool, i32)>,
        skip_pending: bool,
        rewinding: bool,
        capture_msec: Option<i32>,
        timescale: Option<f32>,
        max_fps: Option<i32>,
        frame_rate: f32,
    }

    impl FrozenTick for MockHost {
        fn frozen_tick(&self) -> Option<u32> {
            self.frozen
        }
        fn toggle_frozen_tick(&mut self, pin: Option<u32>) {
            self.frozen = if self.frozen.is_some() { None } else { pin.or(Some(0)) };
        }
        fn update_frozen_tick(&mut self, paused: bool, msec: i32) {
            self.frozen_writes.push((paused, msec));
        }
    }

    impl Rewind for MockHost {
        fn is_rewinding(&self) -> bool {
            self.rewinding
        }
        fn check_skip_forward(&mut self) -> bool {
            core::mem::take(&mut self.skip_pending)
        }
        fn rewind_by(&mut self, _ticks: i32) {}
    }

    impl Capture for MockHost {
        fn is_capturing(&self) -> bool {
            self.capture_msec.is_some()
        }
        fn on_game_frame(&mut self) -> i32 {
            self.capture_msec.unwrap_or(0)
        }
    }

    impl DvarLookup for MockHost {
        fn dvar(&self, name: &str) -> Option<DvarValue> {
            match name {
                TIMESCALE => self.timescale.map(DvarValue::from_float),
                COM_MAXFPS => self.max_fps.map(DvarValue::from_int),
                _ => None,
            }
        }
    }

    impl FrameClock for MockHost {
        fn frame_rate(&self) -> f32 {
            self.frame_rate
        }
    }

    impl DemoClock for MockHost {
        fn demo_info(&self) -> DemoInfo {
            DemoInfo::default()
        }
        fn skip_realtime(&mut self, _ticks: i32) {}
    }

    fn slow_motion_host() -> MockHost {
        MockHost {
            timescale: Some(0.01),
            max_fps: Some(500),
            frame_rate: 500.0,
            ..Default::default()
        }
    }

    #[test]
    fn unscaled_delta_passes_through() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost::default();

        let d = scheduler.compute_delta(&mut host, false, 16);
        assert_eq!(d.mode, PlaybackMode::FastForwardDirect);
        assert_eq!(d.delta, FrameDelta::Direct(16));
    }

    #[test]
    fn skip_forward_contributes_nothing() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { skip_pending: true, ..slow_motion_host() };

        let d = scheduler.compute_delta(&mut host, false, 16);
        assert_eq!(d.mode, PlaybackMode::SkipForward);
        assert_eq!(d.delta, FrameDelta::Direct(0));

        // consumed
        let d = scheduler.compute_delta(&mut host, false, 16);
        assert_eq!(d.mode, PlaybackMode::FastForwardDirect);
    }

    #[test]
    fn skip_forward_is_ignored_while_frozen() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { skip_pending: true, frozen: Some(1000), ..Default::default() };

        let d = scheduler.compute_delta(&mut host, false, 16);
        assert_eq!(d.mode, PlaybackMode::FrozenFastForward);
        assert!(host.skip_pending);
    }

    #[test]
    fn capture_outranks_rewind() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { capture_msec: Some(33), rewinding: true, ..slow_motion_host() };

        let d = scheduler.compute_delta(&mut host, false, 1);
        assert_eq!(d.mode, PlaybackMode::Capturing);
        assert_eq!(d.delta, FrameDelta::Direct(33));
    }

    #[test]
    fn capture_ignores_timescale_and_pause() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { capture_msec: Some(4), ..slow_motion_host() };

        let d = scheduler.compute_delta(&mut host, true, 0);
        assert_eq!(d.delta, FrameDelta::Direct(4));
        assert_eq!(scheduler.clock().generations(), 0);
    }

    #[test]
    fn frozen_capture_writes_accumulator() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { capture_msec: Some(17), frozen: Some(500), ..Default::default() };

        let d = scheduler.compute_delta(&mut host, true, 16);
        assert_eq!(d.mode, PlaybackMode::CapturingFrozen);
        assert_eq!(apply_frame_delta(d.delta, &mut host), 0);
        assert_eq!(host.frozen_writes, vec![(false, 17)]);
    }

    #[test]
    fn rewind_waits_with_fixed_delta() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { rewinding: true, ..slow_motion_host() };

        let d = scheduler.compute_delta(&mut host, true, 1);
        assert_eq!(d.mode, PlaybackMode::RewindingWait);
        assert_eq!(d.delta, FrameDelta::Direct(REWIND_WAIT_MSEC));
    }

    #[test]
    fn rewind_wait_is_tunable() {
        let mut scheduler = PlaybackDeltaScheduler::new(SchedulerConfig { rewind_wait_msec: 20 });
        let mut host = MockHost { rewinding: true, ..Default::default() };

        let d = scheduler.compute_delta(&mut host, false, 16);
        assert_eq!(d.delta, FrameDelta::Direct(20));
    }

    #[test]
    fn paused_returns_zero() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost::default();

        let d = scheduler.compute_delta(&mut host, true, 16);
        assert_eq!(d.mode, PlaybackMode::Paused);
        assert_eq!(d.delta, FrameDelta::Direct(0));
    }

    #[test]
    fn paused_frozen_tick_still_reaches_accumulator() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { frozen: Some(1200), ..Default::default() };

        let d = scheduler.compute_delta(&mut host, true, 16);
        assert_eq!(d.mode, PlaybackMode::FrozenFastForward);
        assert_eq!(apply_frame_delta(d.delta, &mut host), 0);
        assert_eq!(host.frozen_writes, vec![(true, 16)]);
    }

    #[test]
    fn paused_frozen_slow_motion_still_reaches_accumulator() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { frozen: Some(1200), ..slow_motion_host() };

        let d = scheduler.compute_delta(&mut host, true, 0);
        assert_eq!(d.mode, PlaybackMode::FrozenPatternDriven);
        assert_eq!(apply_frame_delta(d.delta, &mut host), 0);
        assert_eq!(host.frozen_writes.len(), 1);
        assert!(host.frozen_writes[0].0);
    }

    #[test]
    fn long_frames_skip_the_pattern() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = slow_motion_host();

        let d = scheduler.compute_delta(&mut host, false, 2);
        assert_eq!(d.delta, FrameDelta::Direct(2));
        assert_eq!(scheduler.clock().generations(), 0);
    }

    #[test]
    fn normal_speed_skips_the_pattern() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { timescale: Some(1.0), max_fps: Some(500), ..Default::default() };

        let d = scheduler.compute_delta(&mut host, false, 1);
        assert_eq!(d.mode, PlaybackMode::FastForwardDirect);
        assert_eq!(d.delta, FrameDelta::Direct(1));
    }

    #[test]
    fn missing_frame_cap_falls_back_to_host_delta() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { timescale: Some(0.01), ..Default::default() };

        let d = scheduler.compute_delta(&mut host, false, 1);
        assert_eq!(d.mode, PlaybackMode::FastForwardDirect);
        assert_eq!(d.delta, FrameDelta::Direct(1));

        host.frozen = Some(10);
        let d = scheduler.compute_delta(&mut host, false, 1);
        assert_eq!(d.delta, FrameDelta::FrozenWrite { msec: 1, paused: false });
    }

    #[test]
    fn slow_motion_averages_to_timescale() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = slow_motion_host();

        let total: i32 = (0..PATTERN_SIZE)
            .map(|_| {
                let d = scheduler.compute_delta(&mut host, false, 0);
                assert_eq!(d.mode, PlaybackMode::PatternDriven);
                d.delta.direct_msec()
            })
            .sum();
        // 0.02ms per frame at 500 fps and 1/100 speed
        assert_eq!(total, 20);
        assert_eq!(scheduler.last_mode(), Some(PlaybackMode::PatternDriven));
    }

    #[test]
    fn frozen_slow_motion_feeds_accumulator() {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = MockHost { frozen: Some(40), ..slow_motion_host() };

        for _ in 0..PATTERN_SIZE {
            let d = scheduler.compute_delta(&mut host, false, 0);
            assert_eq!(apply_frame_delta(d.delta, &mut host), 0);
        }
        let fed: i32 = host.frozen_writes.iter().map(|&(_, msec)| msec).sum();
        assert_eq!(host.frozen_writes.len(), PATTERN_SIZE);
        assert_eq!(fed, 20);
    }
}
