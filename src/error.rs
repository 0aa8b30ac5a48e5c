use crate::extent::Extent;
use crate::frame::Region;

/// A frame descriptor could not be turned into a [`crate::Frame`]
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame has an empty extent ({width}x{height})")]
    EmptyExtent { width: u32, height: u32 },

    #[error("frame region {region:?} lies outside the {canvas:?} canvas")]
    OutsideCanvas { region: Region, canvas: Extent },

    #[error("frame of {width}x{height} is too large to allocate")]
    TooLarge { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferSize { expected: usize, actual: usize },

    #[error("frame has no local or global color table")]
    MissingPalette,

    #[error("color index {index} outside a palette of {len} entries")]
    PaletteIndex { index: u8, len: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bitstream error: {0}")]
    Bitstream(#[from] gif::DecodingError),

    #[error("frame {index}: {source}")]
    Frame {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Attach the frame index a failure belongs to
    pub fn at_frame(self, index: usize) -> Self {
        DecodeError::Frame {
            index,
            source: Box::new(self),
        }
    }
}

/// An animation needs at least one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("frame sequence is empty")]
pub struct EmptySequenceError;

/// Building a [`crate::FrameSet`] from a source failed; nothing partial is kept
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Empty(#[from] EmptySequenceError),
}
