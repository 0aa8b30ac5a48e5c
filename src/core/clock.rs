use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Host time source
pub trait Clock {
    /// Time since this clock's origin
    fn now(&self) -> Duration;

    /// Block until `deadline` (in this clock's time) has been reached
    fn sleep_until(&self, deadline: Duration);
}

/// Wall clock - monotonic time since creation
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&self, deadline: Duration) {
        if let Some(remaining) = deadline.checked_sub(self.now()) {
            std::thread::sleep(remaining);
        }
    }
}

/// Simulated clock - time only moves when told to
///
/// Clones share the same time, so a test can keep one handle while the
/// scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Jump to an absolute time; never moves backwards
    pub fn set(&self, time: Duration) {
        self.now.set(self.now.get().max(time));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep_until(&self, deadline: Duration) {
        self.set(deadline);
    }
}
