use std::time::Duration;

use crate::extent::Extent;

/// What happens to the canvas before the next frame is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposal {
    /// No disposal specified, frame stays on screen
    #[default]
    None,
    /// Leave the frame in place
    DoNotDispose,
    /// Clear the canvas before the next frame
    RestoreToBackground,
    /// Put back whatever was on the canvas before this frame drew
    RestoreToPrevious,
}

impl Disposal {
    /// Resolve a raw graphic-control disposal code
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Disposal::DoNotDispose,
            2 => Disposal::RestoreToBackground,
            3 => Disposal::RestoreToPrevious,
            _ => Disposal::None,
        }
    }
}

/// Sub-rectangle of the canvas covered by a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Region covering a whole canvas
    pub fn full(extent: Extent) -> Self {
        Self::new(0, 0, extent.width, extent.height)
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// True if the region lies entirely inside `canvas`
    pub fn fits_within(&self, canvas: Extent) -> bool {
        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        right <= canvas.width as u64 && bottom <= canvas.height as u64
    }
}

/// Frame - one decoded tile of an animation
///
/// Immutable once decoded: the pixel buffer is exactly `width * height * 4`
/// RGBA bytes and is only ever handed out as a shared slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    region: Region,
    delay: u16,
    disposal: Disposal,
    pixels: Vec<u8>,
}

impl Frame {
    pub(crate) fn new(region: Region, delay: u16, disposal: Disposal, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), region.extent().buffer_size());
        Self {
            region,
            delay,
            disposal,
            pixels,
        }
    }

    pub fn x(&self) -> u32 {
        self.region.x
    }

    pub fn y(&self) -> u32 {
        self.region.y
    }

    pub fn width(&self) -> u32 {
        self.region.width
    }

    pub fn height(&self) -> u32 {
        self.region.height
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Display duration in hundredths of a second
    pub fn delay(&self) -> u16 {
        self.delay
    }

    /// Display duration as wall-clock time
    pub fn delay_duration(&self) -> Duration {
        Duration::from_millis(self.delay as u64 * 10)
    }

    pub fn disposal(&self) -> Disposal {
        self.disposal
    }

    /// RGBA samples, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
