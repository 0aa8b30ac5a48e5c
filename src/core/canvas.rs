use crate::frame::Frame;
use crate::traits::CompositeSurface;

/// Canvas surface failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("region {x},{y} {width}x{height} exceeds the {canvas_width}x{canvas_height} canvas")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("snapshot is {actual} bytes, canvas holds {expected}")]
    SnapshotMismatch { expected: usize, actual: usize },
}

/// Frame pixels prepared for compositing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Sprite {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Saved canvas contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSnapshot {
    pixels: Vec<u8>,
}

/// In-memory RGBA canvas
#[derive(Debug, Clone, Default)]
pub struct PixelCanvas {
    /// RGBA pixel buffer, straight alpha
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    /// Number of sprites built so far
    sprites_created: usize,
}

impl PixelCanvas {
    /// Create new transparent canvas with dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
            sprites_created: 0,
        }
    }

    /// Get pixel buffer
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get canvas dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// RGBA value at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(rgba)
    }

    pub fn sprites_created(&self) -> usize {
        self.sprites_created
    }

    /// Copy out as an `image` buffer, e.g. for PNG export
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let idx = self.index(x, y);
            let mut rgba = [0; 4];
            rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
            image::Rgba(rgba)
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn check_bounds(&self, x: u32, y: u32, width: u32, height: u32) -> Result<(), SurfaceError> {
        let right = x as u64 + width as u64;
        let bottom = y as u64 + height as u64;

        if right > self.width as u64 || bottom > self.height as u64 {
            return Err(SurfaceError::OutOfBounds {
                x,
                y,
                width,
                height,
                canvas_width: self.width,
                canvas_height: self.height,
            });
        }
        Ok(())
    }
}

/// Source-over compositing of one straight-alpha pixel
fn blend(dst: &mut [u8], src: &[u8]) {
    let src_a = src[3] as u32;
    match src_a {
        0 => {}
        255 => dst.copy_from_slice(src),
        _ => {
            let dst_a = dst[3] as u32;
            // All in 0..=255*255 fixed point
            let out_a = src_a * 255 + dst_a * (255 - src_a);
            if out_a == 0 {
                dst.copy_from_slice(&[0, 0, 0, 0]);
                return;
            }
            for c in 0..3 {
                let value = src[c] as u32 * src_a * 255 + dst[c] as u32 * dst_a * (255 - src_a);
                dst[c] = ((value + out_a / 2) / out_a) as u8;
            }
            dst[3] = ((out_a + 127) / 255) as u8;
        }
    }
}

impl CompositeSurface for PixelCanvas {
    type Renderable = Sprite;
    type Snapshot = CanvasSnapshot;
    type Error = SurfaceError;

    fn set_extent(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width as usize * height as usize * 4];
        }
        Ok(())
    }

    fn create_renderable(&mut self, frame: &Frame) -> Result<Sprite, SurfaceError> {
        self.sprites_created += 1;
        Ok(Sprite {
            width: frame.width(),
            height: frame.height(),
            pixels: frame.pixels().to_vec(),
        })
    }

    fn draw_image(&mut self, image: &Sprite, x: u32, y: u32) -> Result<(), SurfaceError> {
        self.check_bounds(x, y, image.width, image.height)?;

        let row_len = image.width as usize * 4;
        for (row, src_row) in image.pixels.chunks_exact(row_len).enumerate() {
            let start = self.index(x, y + row as u32);
            let dst_row = &mut self.pixels[start..start + row_len];

            for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                blend(dst, src);
            }
        }
        Ok(())
    }

    fn clear_region(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.check_bounds(x, y, width, height)?;

        let row_len = width as usize * 4;
        for row in 0..height {
            let start = self.index(x, y + row);
            self.pixels[start..start + row_len].fill(0);
        }
        Ok(())
    }

    fn snapshot(&mut self) -> Result<CanvasSnapshot, SurfaceError> {
        Ok(CanvasSnapshot {
            pixels: self.pixels.clone(),
        })
    }

    fn restore(&mut self, snapshot: &CanvasSnapshot) -> Result<(), SurfaceError> {
        if snapshot.pixels.len() != self.pixels.len() {
            return Err(SurfaceError::SnapshotMismatch {
                expected: self.pixels.len(),
                actual: snapshot.pixels.len(),
            });
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        Ok(())
    }
}
