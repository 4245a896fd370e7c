use std::time::{Duration, Instant};

/// A single cancellable deadline.
///
/// Arming always cancels the pending deadline first, so at most one expiry is
/// outstanding. The owner polls it with the current time (once per frame in
/// the viewer) and reacts when it fires.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Cancels any pending deadline and schedules a new one at `now + delay`.
    pub fn arm(&mut self, now: Instant) {
        self.cancel();
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
