pub mod cli;
pub mod config;
pub mod core;
pub mod decoder;
pub mod error;
pub mod extent;
pub mod frame;
pub mod frame_set;
pub mod source;
pub mod traits;

pub use crate::core::{PlaybackEngine, TickOutcome};
pub use decoder::{decode, decode_all, DecodeStrategy, FrameDescriptor, RawFrame};
pub use error::{BuildError, DecodeError, EmptySequenceError};
pub use extent::Extent;
pub use frame::{Disposal, Frame, Region};
pub use frame_set::{FrameSet, FrameSetSummary, FrameSummary, LoopCount};
pub use source::{build_frame_set, GifFrameDescriptor, GifSource, SourceProvider};
pub use traits::{CompositeSurface, Scheduler, TickToken};
