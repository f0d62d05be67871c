use std::time::{Duration, Instant};

/// How long the pass/fail flash stays visible after an advance.
pub const CLEAR_AFTER: Duration = Duration::from_millis(400);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

/// Transient pass/fail flash with a scoped clear deadline. Re-arming replaces
/// any pending deadline, so the last-armed timer wins under rapid advances.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusFlash {
    status: Option<Status>,
    clear_at: Option<Instant>,
}

impl StatusFlash {
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn set(&mut self, status: Status) {
        self.status = Some(status);
    }

    /// Arm (or replace) the clear deadline. Called on every advance, so the
    /// flash always clears [`CLEAR_AFTER`] later regardless of prior state.
    pub fn rearm(&mut self, now: Instant) {
        self.clear_at = Some(now + CLEAR_AFTER);
    }

    /// Clear the status once the deadline has passed. Returns true if the
    /// status changed, so the caller knows a redraw is worthwhile.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.clear_at {
            Some(deadline) if now >= deadline => {
                self.clear_at = None;
                self.status.take().is_some()
            }
            _ => false,
        }
    }
}
