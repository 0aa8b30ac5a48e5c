use std::time::Duration;

/// Identifies one scheduled render tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickToken(pub u64);

/// Host timer the playback engine schedules its ticks on
pub trait Scheduler {
    /// Current host time, measured from a fixed origin
    fn now(&self) -> Duration;

    /// Arrange for the engine's `tick(token)` to run once, no earlier than `delay` from now
    fn schedule_after(&mut self, delay: Duration, token: TickToken);
}
