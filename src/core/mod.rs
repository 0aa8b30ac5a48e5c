pub mod canvas;
pub mod clock;
pub mod driver;
pub mod engine;
pub mod hooks;
pub mod scheduler;
pub mod timer;

pub use canvas::{CanvasSnapshot, PixelCanvas, Sprite, SurfaceError};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::{PlaybackEngine, PlaybackStats, TickOutcome};
pub use hooks::{default_draw_hook, default_frame_hook, DrawHook, FrameContext, FrameHook};
pub use scheduler::{PendingTick, TimerQueue};
pub use timer::DelayCompensation;
