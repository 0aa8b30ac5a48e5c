use super::clock::Clock;
use super::engine::{PlaybackEngine, TickOutcome};
use super::scheduler::TimerQueue;
use crate::traits::CompositeSurface;

/// Blocking run loop for engines scheduled on a [`TimerQueue`]
impl<S: CompositeSurface, C: Clock> PlaybackEngine<S, TimerQueue<C>> {
    /// Wait for the pending tick and fire it
    ///
    /// Returns `None` once nothing is scheduled.
    pub fn step(&mut self) -> Result<Option<TickOutcome>, S::Error> {
        let Some(pending) = self.scheduler_mut().take_pending() else {
            return Ok(None);
        };

        self.scheduler().clock().sleep_until(pending.deadline);
        self.tick(pending.token).map(Some)
    }

    /// Step until playback stops scheduling ticks
    ///
    /// Never returns for an infinitely looping animation that keeps running.
    pub fn run(&mut self) -> Result<(), S::Error> {
        while self.step()?.is_some() {}
        Ok(())
    }

    /// Step at most `max_ticks` times; returns the number of ticks fired
    pub fn run_for(&mut self, max_ticks: u64) -> Result<u64, S::Error> {
        let mut fired = 0;
        while fired < max_ticks {
            if self.step()?.is_none() {
                break;
            }
            fired += 1;
        }
        Ok(fired)
    }
}
