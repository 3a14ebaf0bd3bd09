use std::time::{Duration, Instant};

/// A cancellable quiet-period delay.
///
/// Each input event re-arms the delay via [`trigger`](Debouncer::trigger);
/// the host event loop observes expiry by calling
/// [`poll`](Debouncer::poll) on every tick. At most one delay is pending
/// at any time — re-arming supersedes the previous deadline, and
/// [`cancel`](Debouncer::cancel) releases it without delivery.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period that must elapse after the last trigger
    delay: Duration,
    /// Deadline of the pending delivery, if any
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period in milliseconds.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            deadline: None,
        }
    }

    /// Arm (or re-arm) the delay. Any previously pending deadline is
    /// superseded.
    pub fn trigger(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Check whether the quiet period has elapsed. Returns `true` at most
    /// once per trigger; the pending state is consumed on delivery.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending delivery. A cancelled delay is never observed by
    /// a later `poll`.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a delivery is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
