use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::decoder::{decode_all, DecodeStrategy, FrameDescriptor};
use crate::error::{BuildError, DecodeError};
use crate::extent::Extent;
use crate::frame::{Disposal, Region};
use crate::frame_set::{FrameSet, LoopCount};

/// Anything that can list the frames of an animation
pub trait SourceProvider {
    type Descriptor: FrameDescriptor + Sync;

    fn canvas(&self) -> Extent;

    fn loop_count(&self) -> LoopCount;

    /// Frame descriptors in display order
    fn frames(&self) -> &[Self::Descriptor];
}

/// Decode every frame of `provider` into a frame set, all-or-nothing
pub fn build_frame_set<P: SourceProvider>(
    provider: &P,
    strategy: DecodeStrategy,
) -> Result<FrameSet, BuildError> {
    let canvas = provider.canvas();
    let frames = decode_all(provider.frames(), canvas, strategy)?;
    let frame_set = FrameSet::build(frames, canvas, provider.loop_count())?;

    log::info!(
        "built frame set: {} frames, {}x{}, loop {:?}",
        frame_set.len(),
        canvas.width,
        canvas.height,
        frame_set.loop_count()
    );

    Ok(frame_set)
}

/// Indexed GIF frame waiting for palette expansion
#[derive(Debug, Clone)]
pub struct GifFrameDescriptor {
    region: Region,
    delay: u16,
    disposal: Disposal,
    palette: Option<Arc<[u8]>>,
    transparent: Option<u8>,
    indices: Vec<u8>,
}

impl GifFrameDescriptor {
    /// Index of the transparent palette entry, if any
    pub fn transparent(&self) -> Option<u8> {
        self.transparent
    }
}

impl FrameDescriptor for GifFrameDescriptor {
    fn region(&self) -> Region {
        self.region
    }

    fn delay(&self) -> u16 {
        self.delay
    }

    fn disposal(&self) -> Disposal {
        self.disposal
    }

    fn decode_into(&self, out: &mut [u8]) -> Result<(), DecodeError> {
        let palette = self.palette.as_deref().ok_or(DecodeError::MissingPalette)?;
        let entries = palette.len() / 3;

        if self.indices.len() * 4 != out.len() {
            return Err(DecodeError::PixelBufferSize {
                expected: out.len(),
                actual: self.indices.len() * 4,
            });
        }

        for (&index, pixel) in self.indices.iter().zip(out.chunks_exact_mut(4)) {
            if Some(index) == self.transparent {
                pixel.copy_from_slice(&[0, 0, 0, 0]);
                continue;
            }

            let i = index as usize;
            if i >= entries {
                return Err(DecodeError::PaletteIndex { index, len: entries });
            }

            pixel[..3].copy_from_slice(&palette[i * 3..i * 3 + 3]);
            pixel[3] = 255;
        }

        Ok(())
    }
}

/// Source provider backed by the `gif` crate
///
/// The bitstream (blocks, LZW, interlacing) is parsed up front into indexed
/// frames; palette expansion to RGBA happens per frame in `decode_into`, so
/// frames can be expanded in parallel.
#[derive(Debug, Clone)]
pub struct GifSource {
    canvas: Extent,
    loop_count: LoopCount,
    frames: Vec<GifFrameDescriptor>,
}

impl GifSource {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DecodeError> {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);

        let mut decoder = options.read_info(reader)?;
        let canvas = Extent::new(decoder.width() as u32, decoder.height() as u32);
        let global: Option<Arc<[u8]>> = decoder.global_palette().map(Arc::from);

        let mut frames = Vec::new();
        while let Some(frame) = decoder.read_next_frame()? {
            let palette = match &frame.palette {
                Some(local) => Some(Arc::from(local.as_slice())),
                None => global.clone(),
            };

            frames.push(GifFrameDescriptor {
                region: Region::new(
                    frame.left as u32,
                    frame.top as u32,
                    frame.width as u32,
                    frame.height as u32,
                ),
                delay: frame.delay,
                disposal: disposal_from_gif(frame.dispose),
                palette,
                transparent: frame.transparent,
                indices: frame.buffer.to_vec(),
            });
        }

        // The application extension is only known once the stream has been read
        let loop_count = match decoder.repeat() {
            gif::Repeat::Infinite => LoopCount::Infinite,
            gif::Repeat::Finite(n) => LoopCount::Finite(n as u32),
        };

        log::debug!(
            "parsed gif: {} frames, {}x{}",
            frames.len(),
            canvas.width,
            canvas.height
        );

        Ok(Self {
            canvas,
            loop_count,
            frames,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_reader(bytes)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl SourceProvider for GifSource {
    type Descriptor = GifFrameDescriptor;

    fn canvas(&self) -> Extent {
        self.canvas
    }

    fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    fn frames(&self) -> &[GifFrameDescriptor] {
        &self.frames
    }
}

fn disposal_from_gif(method: gif::DisposalMethod) -> Disposal {
    match method {
        gif::DisposalMethod::Any => Disposal::None,
        gif::DisposalMethod::Keep => Disposal::DoNotDispose,
        gif::DisposalMethod::Background => Disposal::RestoreToBackground,
        gif::DisposalMethod::Previous => Disposal::RestoreToPrevious,
    }
}
