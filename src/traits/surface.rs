use crate::frame::Frame;

/// Drawing surface the playback engine composites onto
///
/// Only ever called from render ticks, one at a time.
pub trait CompositeSurface {
    /// Surface-specific resource built from a frame's pixels
    type Renderable;
    /// Saved copy of the surface contents
    type Snapshot;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resize to the animation's canvas
    fn set_extent(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    /// Upload a frame's pixels; the engine calls this at most once per frame
    fn create_renderable(&mut self, frame: &Frame) -> Result<Self::Renderable, Self::Error>;

    /// Composite a renderable with its top-left corner at (x, y)
    fn draw_image(&mut self, image: &Self::Renderable, x: u32, y: u32) -> Result<(), Self::Error>;

    /// Reset a rectangle to the background (transparent)
    fn clear_region(&mut self, x: u32, y: u32, width: u32, height: u32)
        -> Result<(), Self::Error>;

    fn snapshot(&mut self) -> Result<Self::Snapshot, Self::Error>;

    fn restore(&mut self, snapshot: &Self::Snapshot) -> Result<(), Self::Error>;
}
