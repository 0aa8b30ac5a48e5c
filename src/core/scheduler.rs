use std::time::Duration;

use super::clock::Clock;
use crate::traits::{Scheduler, TickToken};

/// A tick waiting to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    /// Absolute clock time the tick is due
    pub deadline: Duration,
    pub token: TickToken,
}

/// Single-slot scheduler over a [`Clock`]
///
/// Holds at most one pending tick; scheduling again replaces it.
#[derive(Debug, Clone)]
pub struct TimerQueue<C: Clock> {
    clock: C,
    pending: Option<PendingTick>,
}

impl<C: Clock> TimerQueue<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            pending: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    /// Remove and return the pending tick
    pub fn take_pending(&mut self) -> Option<PendingTick> {
        self.pending.take()
    }
}

impl<C: Clock> Scheduler for TimerQueue<C> {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn schedule_after(&mut self, delay: Duration, token: TickToken) {
        let deadline = self.clock.now() + delay;
        if let Some(replaced) = self.pending.replace(PendingTick { deadline, token }) {
            log::trace!("tick {:?} replaced by {:?}", replaced.token, token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    #[test]
    fn schedules_relative_to_now() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(40));
        let mut queue = TimerQueue::new(clock);

        queue.schedule_after(Duration::from_millis(100), TickToken(1));

        assert_eq!(
            queue.pending(),
            Some(PendingTick {
                deadline: Duration::from_millis(140),
                token: TickToken(1),
            })
        );
    }

    #[test]
    fn holds_a_single_tick() {
        let mut queue = TimerQueue::new(ManualClock::new());

        queue.schedule_after(Duration::from_millis(10), TickToken(1));
        queue.schedule_after(Duration::from_millis(20), TickToken(2));

        let pending = queue.take_pending().unwrap();
        assert_eq!(pending.token, TickToken(2));
        assert!(queue.take_pending().is_none());
    }
}
