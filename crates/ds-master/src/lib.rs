//! Headless playback session for demoscrub.
//!
//! Owns a demo clock, the playback scheduler and in-memory stand-ins for
//! every collaborator it consults, so the CLI and tests drive the whole
//! frame loop without a game attached.

mod capture;
mod demo;
mod dvars;
mod error;
mod frozen;
mod host;
mod rewind;

use std::num::NonZeroU32;

use ds_engine::{apply_frame_delta, PlaybackDeltaScheduler, Transport};
use ds_ir::TIMESCALE;

use host::HostState;

// Re-export common types so callers don't need ds-ir/ds-engine directly.
pub use capture::CaptureSession;
pub use demo::DemoState;
pub use ds_engine::{SchedulerConfig, TickDeltaAction, TickDeltaController};
pub use ds_ir::{DemoInfo, DvarValue, FrameDecision, FrameDelta, PlaybackMode};
pub use dvars::{DvarStore, DEFAULT_MAX_FPS};
pub use error::ConfigError;
pub use frozen::FrozenTickState;
pub use rewind::PendingRewind;

/// Headless demo playback. Owns the demo clock and drives it frame by frame.
pub struct Session {
    host: HostState,
    scheduler: PlaybackDeltaScheduler,
    ticks: TickDeltaController,
    transport: Transport,
    /// Sub-millisecond remainder of the host's scaled frame time.
    msec_carry: f32,
    frames: u64,
}

impl Session {
    pub fn new(demo: DemoState, dvars: DvarStore) -> Self {
        Self::with_config(demo, dvars, SchedulerConfig::default(), TickDeltaController::default())
    }

    pub fn with_config(
        demo: DemoState,
        dvars: DvarStore,
        config: SchedulerConfig,
        ticks: TickDeltaController,
    ) -> Self {
        Self {
            host: HostState {
                demo,
                frozen: FrozenTickState::new(),
                rewind: PendingRewind::new(),
                capture: None,
                dvars,
                meter: Default::default(),
            },
            scheduler: PlaybackDeltaScheduler::new(config),
            ticks,
            transport: Transport::new(),
            msec_carry: 0.0,
            frames: 0,
        }
    }

    // --- Frame loop ---

    /// Run one rendered frame that took `frame_seconds` of real time.
    ///
    /// Derives the host's own millisecond delta from the timescale, asks the
    /// scheduler what to do with it and applies the result.
    pub fn run_frame(&mut self, frame_seconds: f32) -> FrameDecision {
        self.host.meter.record(frame_seconds);
        let game_msec = self.host_frame_msec(frame_seconds);
        let paused = self.transport.is_paused();

        let decision = self.compute_delta(paused, game_msec);
        let msec = apply_frame_delta(decision.delta, &mut self.host);
        self.host.demo.advance(msec);

        if let Some(target) = self.host.rewind.resolve() {
            self.host.demo.restore(target);
            tracing::debug!(target, "rewind restored");
        }

        self.frames += 1;
        decision
    }

    #[cfg(not(feature = "alloc_check"))]
    fn compute_delta(&mut self, paused: bool, game_msec: i32) -> FrameDecision {
        self.scheduler.compute_delta(&mut self.host, paused, game_msec)
    }

    #[cfg(feature = "alloc_check")]
    fn compute_delta(&mut self, paused: bool, game_msec: i32) -> FrameDecision {
        let scheduler = &mut self.scheduler;
        let host = &mut self.host;
        assert_no_alloc::assert_no_alloc(|| scheduler.compute_delta(host, paused, game_msec))
    }

    /// What the engine itself would advance this frame: real time scaled by
    /// `timescale`, whole milliseconds, never below 1.
    fn host_frame_msec(&mut self, frame_seconds: f32) -> i32 {
        let timescale = self
            .host
            .dvars
            .get(TIMESCALE)
            .map_or(1.0, |v| v.floating_point)
            .max(0.0);
        let scaled = frame_seconds.max(0.0) * 1000.0 * timescale + self.msec_carry;
        let msec = scaled as i32;
        if msec < 1 {
            self.msec_carry = 0.0;
            return 1;
        }
        self.msec_carry = scaled - msec as f32;
        msec
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_mode(&self) -> Option<PlaybackMode> {
        self.scheduler.last_mode()
    }

    pub fn scheduler(&self) -> &PlaybackDeltaScheduler {
        &self.scheduler
    }

    // --- Transport ---

    pub fn is_paused(&self) -> bool {
        self.transport.is_paused()
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.transport.toggle_paused()
    }

    // --- Seeking ---

    /// Apply a signed tick offset from the scrubber.
    pub fn set_tick_delta(&mut self, ticks: i32, ignore_deadzone: bool) -> TickDeltaAction {
        self.ticks.apply_signed_delta(&mut self.host, ticks, ignore_deadzone)
    }

    pub fn skip_forward(&mut self, ticks: i32, ignore_frozen_tick: bool) -> TickDeltaAction {
        self.ticks.skip_forward(&mut self.host, ticks, ignore_frozen_tick)
    }

    pub fn is_rewinding(&self) -> bool {
        self.host.rewind.is_rewinding()
    }

    // --- Frozen tick ---

    /// Pin the current tick, or release the pin.
    pub fn toggle_frozen_tick(&mut self) {
        let current = self.host.demo.current_tick();
        self.host.frozen.toggle(None, current);
    }

    pub fn frozen_tick(&self) -> &FrozenTickState {
        &self.host.frozen
    }

    /// Reconcile with frozen-tick state loaded from an imported file.
    pub fn import_frozen_tick(&mut self, desired: Option<u32>) {
        self.ticks
            .handle_imported_frozen_tick(&mut self.host, &mut self.transport, desired);
    }

    // --- Capture ---

    /// Start capturing at `fps` output frames per second.
    pub fn start_capture(&mut self, fps: u32) -> Result<(), ConfigError> {
        let fps = NonZeroU32::new(fps).ok_or_else(|| ConfigError::InvalidValue {
            name: "capture fps".to_string(),
            value: fps.to_string(),
        })?;
        self.host.capture = Some(CaptureSession::new(fps));
        tracing::info!(fps = fps.get(), tick = self.host.demo.current_tick(), "capture started");
        Ok(())
    }

    /// Stop capturing; returns the finished session.
    pub fn stop_capture(&mut self) -> Option<CaptureSession> {
        let capture = self.host.capture.take()?;
        tracing::info!(frames = capture.frames(), "capture stopped");
        Some(capture)
    }

    pub fn is_capturing(&self) -> bool {
        self.host.capture.is_some()
    }

    // --- Demo & config ---

    pub fn demo_info(&self) -> DemoInfo {
        DemoInfo {
            frozen_tick: self.host.frozen.pinned(),
            ..self.host.demo.info()
        }
    }

    pub fn current_tick(&self) -> u32 {
        self.host.demo.current_tick()
    }

    pub fn is_finished(&self) -> bool {
        self.host.demo.is_finished()
    }

    pub fn dvars(&self) -> &DvarStore {
        &self.host.dvars
    }

    pub fn dvars_mut(&mut self) -> &mut DvarStore {
        &mut self.host.dvars
    }

    /// Change a console variable between frames. The scheduler picks the
    /// new value up on the next frame.
    pub fn set_dvar(&mut self, name: &str, value: DvarValue) {
        tracing::debug!(name, ?value, "dvar set");
        self.host.dvars.set(name, value);
    }

    /// Measured frame rate fed to the slow-motion pattern.
    pub fn frame_rate(&self) -> f32 {
        self.host.meter.frame_rate()
    }
}
