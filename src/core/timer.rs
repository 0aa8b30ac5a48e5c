use std::time::Duration;

/// Drift-correcting delay accumulator
///
/// Tracks how far real time has run ahead of (positive) or behind (negative)
/// the delays handed out so far, in microseconds. Every delay handed out is
/// shortened by the accumulated lateness, so the sum of scheduled delays keeps
/// tracking the wall clock despite per-tick jitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelayCompensation {
    accumulated: i64,
}

impl DelayCompensation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add real time that passed since the last measurement
    pub fn accumulate(&mut self, delta: Duration) {
        self.accumulated = self.accumulated.saturating_add(micros(delta));
    }

    /// Consume `wanted` and return how long to actually wait
    ///
    /// Returns `None` when the wait is already overdue; the wanted time is
    /// still consumed so the caller can move on to the next frame.
    pub fn next_delay(&mut self, wanted: Duration) -> Option<Duration> {
        let wanted = micros(wanted);
        let actual = wanted - self.accumulated;
        self.accumulated -= wanted;

        if actual < 0 {
            None
        } else {
            Some(Duration::from_micros(actual as u64))
        }
    }

    /// Accumulated lateness (negative when ahead of schedule)
    pub fn lateness_micros(&self) -> i64 {
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = 0;
    }
}

fn micros(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}
