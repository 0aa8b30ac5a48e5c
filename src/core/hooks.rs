use once_cell::unsync::OnceCell;

use crate::frame::Frame;
use crate::traits::CompositeSurface;

/// Paints a frame's renderable onto the surface
///
/// Arguments: surface, renderable, frame, frame index.
pub type DrawHook<S> = Box<
    dyn FnMut(
        &mut S,
        &<S as CompositeSurface>::Renderable,
        &Frame,
        usize,
    ) -> Result<(), <S as CompositeSurface>::Error>,
>;

/// Runs once per rendered frame; the default builds the renderable and
/// hands it to the draw hook
pub type FrameHook<S> =
    Box<dyn FnMut(&mut FrameContext<'_, S>) -> Result<(), <S as CompositeSurface>::Error>>;

/// Blit the renderable at the frame's offset
pub fn default_draw_hook<S: CompositeSurface>() -> DrawHook<S> {
    Box::new(
        |surface: &mut S, image: &S::Renderable, frame: &Frame, _index: usize| {
            surface.draw_image(image, frame.x(), frame.y())
        },
    )
}

pub fn default_frame_hook<S: CompositeSurface>() -> FrameHook<S> {
    Box::new(|ctx: &mut FrameContext<'_, S>| ctx.draw())
}

/// Everything a frame hook may touch during one render tick
pub struct FrameContext<'a, S: CompositeSurface> {
    surface: &'a mut S,
    frame: &'a Frame,
    index: usize,
    renderable: &'a OnceCell<S::Renderable>,
    draw: &'a mut DrawHook<S>,
    stop_requested: bool,
}

impl<'a, S: CompositeSurface> FrameContext<'a, S> {
    pub(crate) fn new(
        surface: &'a mut S,
        frame: &'a Frame,
        index: usize,
        renderable: &'a OnceCell<S::Renderable>,
        draw: &'a mut DrawHook<S>,
    ) -> Self {
        Self {
            surface,
            frame,
            index,
            renderable,
            draw,
            stop_requested: false,
        }
    }

    pub fn frame(&self) -> &Frame {
        self.frame
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// The frame's renderable, built on first use and cached
    pub fn renderable(&mut self) -> Result<&'a S::Renderable, S::Error> {
        let cell = self.renderable;
        let surface = &mut *self.surface;
        let frame = self.frame;
        cell.get_or_try_init(|| surface.create_renderable(frame))
    }

    /// Run the draw hook for this frame
    pub fn draw(&mut self) -> Result<(), S::Error> {
        let image = self.renderable()?;
        (self.draw)(&mut *self.surface, image, self.frame, self.index)
    }

    /// Stop playback once this tick finishes; no further tick is scheduled
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}
