//! Rewind stand-in for headless playback.

/// Queues a rewind target and resolves it a frame later, the way a
/// snapshot-based rewind engine reports progress: one frame "rewinding",
/// then one frame with an exact-position skip due.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingRewind {
    target: Option<u32>,
    skip_due: bool,
}

impl PendingRewind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rewinding(&self) -> bool {
        self.target.is_some()
    }

    /// Queue a rewind to `target`. A newer request replaces an older one.
    pub fn request(&mut self, target: u32) {
        self.target = Some(target);
    }

    /// Target to restore now; marks the skip-forward frame as due.
    pub fn resolve(&mut self) -> Option<u32> {
        let target = self.target.take()?;
        self.skip_due = true;
        Some(target)
    }

    /// Consume the pending skip-forward frame.
    pub fn take_skip(&mut self) -> bool {
        core::mem::take(&mut self.skip_due)
    }
}
