//! Trailing-edge debounce
//!
//! Cancel-and-restart scheduling driven by a host clock. The host passes
//! timestamps (time since any fixed origin, e.g. `performance.now()`) and
//! polls from its frame loop; nothing here owns a timer or thread.

use std::time::Duration;

/// Deferred action that fires once after a quiet period
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending firing and re-arm from `now`
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending firing, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true exactly once when the quiet period has elapsed
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
