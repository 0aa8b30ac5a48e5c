use rayon::prelude::*;

use crate::error::DecodeError;
use crate::extent::Extent;
use crate::frame::{Disposal, Frame, Region};

/// One undecoded frame as handed out by a source provider
pub trait FrameDescriptor {
    /// Position and size within the canvas
    fn region(&self) -> Region;

    /// Display duration in hundredths of a second
    fn delay(&self) -> u16;

    fn disposal(&self) -> Disposal;

    /// Write `width * height` RGBA samples into `out`
    ///
    /// `out` is zeroed and exactly `width * height * 4` bytes long.
    fn decode_into(&self, out: &mut [u8]) -> Result<(), DecodeError>;
}

/// How `decode_all` spreads work across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    Sequential,
    #[default]
    Parallel,
}

/// Descriptor over already-expanded RGBA samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub region: Region,
    pub delay: u16,
    /// Graphic-control disposal code (0-3, anything else means none)
    pub disposal_code: u8,
    pub pixels: Vec<u8>,
}

impl RawFrame {
    pub fn new(region: Region, delay: u16, disposal_code: u8, pixels: Vec<u8>) -> Self {
        Self {
            region,
            delay,
            disposal_code,
            pixels,
        }
    }

    /// Frame filled with a single color
    pub fn solid(region: Region, delay: u16, disposal_code: u8, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(region.extent().pixel_count());
        Self::new(region, delay, disposal_code, pixels)
    }
}

impl FrameDescriptor for RawFrame {
    fn region(&self) -> Region {
        self.region
    }

    fn delay(&self) -> u16 {
        self.delay
    }

    fn disposal(&self) -> Disposal {
        Disposal::from_code(self.disposal_code)
    }

    fn decode_into(&self, out: &mut [u8]) -> Result<(), DecodeError> {
        if self.pixels.len() != out.len() {
            return Err(DecodeError::PixelBufferSize {
                expected: out.len(),
                actual: self.pixels.len(),
            });
        }
        out.copy_from_slice(&self.pixels);
        Ok(())
    }
}

/// Decode a single frame, checking it against the canvas
pub fn decode<D: FrameDescriptor + ?Sized>(
    descriptor: &D,
    canvas: Extent,
) -> Result<Frame, DecodeError> {
    let region = descriptor.region();

    if region.extent().is_empty() {
        return Err(DecodeError::EmptyExtent {
            width: region.width,
            height: region.height,
        });
    }

    if !region.fits_within(canvas) {
        return Err(DecodeError::OutsideCanvas { region, canvas });
    }

    let size = region
        .extent()
        .checked_buffer_size()
        .ok_or(DecodeError::TooLarge {
            width: region.width,
            height: region.height,
        })?;
    let mut pixels = vec![0; size];
    descriptor.decode_into(&mut pixels)?;

    Ok(Frame::new(
        region,
        descriptor.delay(),
        descriptor.disposal(),
        pixels,
    ))
}

/// Decode every frame, keeping display order
///
/// Both strategies yield identical output. On failure the error for the
/// lowest failing index is returned, wrapped in [`DecodeError::Frame`].
pub fn decode_all<D>(
    descriptors: &[D],
    canvas: Extent,
    strategy: DecodeStrategy,
) -> Result<Vec<Frame>, DecodeError>
where
    D: FrameDescriptor + Sync,
{
    log::debug!(
        "decoding {} frames ({:?}) for {}x{} canvas",
        descriptors.len(),
        strategy,
        canvas.width,
        canvas.height
    );

    let decode_indexed =
        |(index, descriptor): (usize, &D)| decode(descriptor, canvas).map_err(|e| e.at_frame(index));

    match strategy {
        DecodeStrategy::Sequential => descriptors.iter().enumerate().map(decode_indexed).collect(),
        DecodeStrategy::Parallel => {
            // Reassembled by index: the lowest failing index wins
            let results: Vec<Result<Frame, DecodeError>> = descriptors
                .par_iter()
                .enumerate()
                .map(decode_indexed)
                .collect();
            results.into_iter().collect()
        }
    }
}
