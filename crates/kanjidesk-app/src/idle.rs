use std::time::Duration;

use tokio::time::Instant;

/// Decides when the startup update check goes out: after a quiet period
/// with no worker traffic, or at the deadline, whichever comes first.
/// Fires once.
#[derive(Debug, Clone)]
pub struct IdleScheduler {
    quiet: Duration,
    deadline: Instant,
    last_activity: Instant,
    fired: bool,
}

impl IdleScheduler {
    pub fn new(now: Instant, quiet: Duration, timeout: Duration) -> Self {
        Self {
            quiet,
            deadline: now + timeout,
            last_activity: now,
            fired: false,
        }
    }

    /// Something happened; idleness restarts from `now`
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn next_wake(&self) -> Instant {
        (self.last_activity + self.quiet).min(self.deadline)
    }

    /// True exactly once, when the check is due
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired {
            return false;
        }
        if now >= self.deadline || now >= self.last_activity + self.quiet {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn fired(&self) -> bool {
        self.fired
    }
}
