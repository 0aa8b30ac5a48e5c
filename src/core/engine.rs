use std::sync::Arc;
use std::time::Duration;

use once_cell::unsync::OnceCell;

use super::hooks::{default_draw_hook, default_frame_hook, DrawHook, FrameContext, FrameHook};
use super::timer::DelayCompensation;
use crate::frame::{Disposal, Frame};
use crate::frame_set::FrameSet;
use crate::traits::{CompositeSurface, Scheduler, TickToken};

/// Disposal work carried over to the next tick
#[derive(Debug, Clone)]
enum PendingRestore<T> {
    Background,
    Previous(T),
}

/// What a call to [`PlaybackEngine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Drew the frame at this index
    Drew(usize),
    /// Playback is stopped; nothing drawn
    Idle,
    /// Token does not match the pending tick; ignored
    Stale,
}

/// Counters kept across a playback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Ticks that ran the frame hook; a custom hook may draw nothing on some of them
    pub frames_drawn: u64,
    /// Overdue frames passed over without a tick
    pub frames_skipped: u64,
}

/// Mutable playback state, owned by the engine alone
#[derive(Debug)]
struct PlaybackState<T> {
    frame_index: usize,
    loops_completed: u32,
    running: bool,
    last_tick: Duration,
    timing: DelayCompensation,
    pending_restore: Option<PendingRestore<T>>,
    pending_tick: Option<TickToken>,
    next_token: u64,
    stats: PlaybackStats,
}

impl<T> PlaybackState<T> {
    fn new() -> Self {
        Self {
            frame_index: 0,
            loops_completed: 0,
            running: false,
            last_tick: Duration::ZERO,
            timing: DelayCompensation::new(),
            pending_restore: None,
            pending_tick: None,
            next_token: 0,
            stats: PlaybackStats::default(),
        }
    }
}

/// Drives a [`FrameSet`] onto a [`CompositeSurface`]
///
/// Playback is a chain of render ticks. Each tick realizes the previous
/// frame's disposal, draws the current frame, and schedules the next tick
/// through the host [`Scheduler`]. Scheduling is drift-compensated: late ticks
/// shorten the following delays, and frames whose time has already passed are
/// skipped without being drawn.
///
/// ```no_run
/// use gif_player::{GifSource, DecodeStrategy, build_frame_set};
/// use gif_player::core::{MonotonicClock, PixelCanvas, PlaybackEngine, TimerQueue};
///
/// let source = GifSource::open("spinner.gif")?;
/// let frames = build_frame_set(&source, DecodeStrategy::Parallel)?;
/// let mut engine = PlaybackEngine::new(
///     frames,
///     PixelCanvas::default(),
///     TimerQueue::new(MonotonicClock::new()),
/// )?;
/// engine.start();
/// engine.run()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PlaybackEngine<S: CompositeSurface, H: Scheduler> {
    frames: Arc<FrameSet>,
    surface: S,
    scheduler: H,
    renderables: Vec<OnceCell<S::Renderable>>,
    state: PlaybackState<S::Snapshot>,
    on_frame: FrameHook<S>,
    on_draw: DrawHook<S>,
}

impl<S: CompositeSurface, H: Scheduler> PlaybackEngine<S, H> {
    /// Bind a frame set to a surface; the surface is sized to the canvas
    pub fn new(
        frames: impl Into<Arc<FrameSet>>,
        mut surface: S,
        scheduler: H,
    ) -> Result<Self, S::Error> {
        let frames = frames.into();
        let canvas = frames.canvas();
        surface.set_extent(canvas.width, canvas.height)?;

        Ok(Self {
            renderables: (0..frames.len()).map(|_| OnceCell::new()).collect(),
            frames,
            surface,
            scheduler,
            state: PlaybackState::new(),
            on_frame: default_frame_hook(),
            on_draw: default_draw_hook(),
        })
    }

    /// Replace the per-frame hook
    pub fn set_frame_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&mut FrameContext<'_, S>) -> Result<(), S::Error> + 'static,
    {
        self.on_frame = Box::new(hook);
    }

    /// Replace the draw hook
    pub fn set_draw_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&mut S, &S::Renderable, &Frame, usize) -> Result<(), S::Error> + 'static,
    {
        self.on_draw = Box::new(hook);
    }

    pub fn with_frame_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut FrameContext<'_, S>) -> Result<(), S::Error> + 'static,
    {
        self.set_frame_hook(hook);
        self
    }

    pub fn with_draw_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut S, &S::Renderable, &Frame, usize) -> Result<(), S::Error> + 'static,
    {
        self.set_draw_hook(hook);
        self
    }

    /// Begin playback; the first frame renders on a zero-delay tick
    ///
    /// Calling this while already running does nothing.
    pub fn start(&mut self) {
        if self.state.running {
            return;
        }

        self.state.running = true;
        self.state.last_tick = self.scheduler.now();
        self.state.timing.reset();

        log::info!(
            "playback started at frame {} ({} frames, loop {:?})",
            self.state.frame_index,
            self.frames.len(),
            self.frames.loop_count()
        );

        self.schedule(Duration::ZERO);
    }

    /// Stop playback; a tick that is already scheduled becomes a no-op
    pub fn stop(&mut self) {
        if self.state.running {
            log::info!(
                "playback stopped at frame {} after {} loops",
                self.state.frame_index,
                self.state.loops_completed
            );
        }
        self.state.running = false;
    }

    /// Rewind to the first frame and first pass, leaving `running` untouched
    pub fn reset(&mut self) {
        self.state.frame_index = 0;
        self.state.loops_completed = 0;
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Frame the next tick will draw
    pub fn frame_index(&self) -> usize {
        self.state.frame_index
    }

    pub fn loops_completed(&self) -> u32 {
        self.state.loops_completed
    }

    pub fn stats(&self) -> PlaybackStats {
        self.state.stats
    }

    /// Token of the tick currently waiting to fire
    pub fn pending_tick(&self) -> Option<TickToken> {
        self.state.pending_tick
    }

    pub fn frame_set(&self) -> &FrameSet {
        &self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut H {
        &mut self.scheduler
    }

    /// Cached renderable for a frame, if it has been drawn on this surface
    pub fn renderable(&self, index: usize) -> Option<&S::Renderable> {
        self.renderables.get(index).and_then(OnceCell::get)
    }

    /// Render tick: called by the host when a scheduled tick fires
    ///
    /// A surface error aborts the tick. The engine stays running but nothing
    /// further is scheduled; the caller decides whether to stop or restart.
    pub fn tick(&mut self, token: TickToken) -> Result<TickOutcome, S::Error> {
        if self.state.pending_tick != Some(token) {
            log::trace!("ignoring stale tick {:?}", token);
            return Ok(TickOutcome::Stale);
        }
        self.state.pending_tick = None;

        if !self.state.running {
            return Ok(TickOutcome::Idle);
        }

        let frames = Arc::clone(&self.frames);
        let index = self.state.frame_index;
        let frame = &frames[index];
        log::trace!("tick {:?}: frame {}", token, index);

        // The previous frame's disposal applies now that it leaves the screen
        match self.state.pending_restore.take() {
            Some(PendingRestore::Background) => {
                let canvas = frames.canvas();
                self.surface.clear_region(0, 0, canvas.width, canvas.height)?;
            }
            Some(PendingRestore::Previous(snapshot)) => self.surface.restore(&snapshot)?,
            None => {}
        }

        // Must capture the canvas as it was before this frame draws
        let snapshot = match frame.disposal() {
            Disposal::RestoreToPrevious => Some(self.surface.snapshot()?),
            _ => None,
        };

        let mut ctx = FrameContext::new(
            &mut self.surface,
            frame,
            index,
            &self.renderables[index],
            &mut self.on_draw,
        );
        (self.on_frame)(&mut ctx)?;
        let stop_requested = ctx.stop_requested();

        self.state.stats.frames_drawn += 1;
        self.state.pending_restore = match frame.disposal() {
            Disposal::None | Disposal::DoNotDispose => None,
            Disposal::RestoreToBackground => Some(PendingRestore::Background),
            Disposal::RestoreToPrevious => snapshot.map(PendingRestore::Previous),
        };

        if stop_requested {
            self.stop();
            // Resume on the following frame after a restart
            self.advance_frame();
        } else {
            self.advance_and_delay();
        }

        Ok(TickOutcome::Drew(index))
    }

    /// Move to the next due frame and schedule its tick
    fn advance_and_delay(&mut self) {
        let frames = Arc::clone(&self.frames);
        let all_zero = frames.total_delay().is_zero();

        loop {
            if !self.advance_frame() {
                return;
            }

            let now = self.scheduler.now();
            let delta = now.saturating_sub(self.state.last_tick);
            self.state.last_tick = now;
            self.state.timing.accumulate(delta);

            let wanted = frames[self.state.frame_index].delay_duration();
            match self.state.timing.next_delay(wanted) {
                Some(delay) => {
                    self.schedule(delay);
                    return;
                }
                // Nothing to skip towards when every frame is zero-delay
                None if all_zero => {
                    self.state.timing.reset();
                    self.schedule(Duration::ZERO);
                    return;
                }
                None => {
                    self.state.stats.frames_skipped += 1;
                    log::debug!(
                        "skipping overdue frame {} ({}us late)",
                        self.state.frame_index,
                        self.state.timing.lateness_micros()
                    );
                }
            }
        }
    }

    /// Step `frame_index` forward one frame, wrapping into the next pass
    ///
    /// Returns false once the loop count is exhausted; playback is then stopped.
    fn advance_frame(&mut self) -> bool {
        let len = self.frames.len();
        self.state.frame_index += 1;
        if self.state.frame_index < len {
            return true;
        }

        if self.frames.loop_count().is_exhausted(self.state.loops_completed) {
            log::info!(
                "loop count exhausted after {} passes",
                self.state.loops_completed + 1
            );
            // Park on the final frame, which stays on screen
            self.state.frame_index = len - 1;
            self.stop();
            return false;
        }

        self.state.frame_index = 0;
        self.state.loops_completed += 1;
        true
    }

    fn schedule(&mut self, delay: Duration) {
        self.state.next_token += 1;
        let token = TickToken(self.state.next_token);
        self.state.pending_tick = Some(token);
        self.scheduler.schedule_after(delay, token);
    }
}
