use std::ops::Index;
use std::time::Duration;

use crate::error::EmptySequenceError;
use crate::extent::Extent;
use crate::frame::{Disposal, Frame, Region};

/// How many extra passes follow the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopCount {
    #[default]
    Infinite,
    /// Number of additional passes; `Finite(0)` plays once
    Finite(u32),
}

impl LoopCount {
    /// Numeric form: 0 is infinite, k > 0 repeats k more times
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => LoopCount::Infinite,
            k => LoopCount::Finite(k),
        }
    }

    /// True once `completed` passes exhaust the count
    pub fn is_exhausted(&self, completed: u32) -> bool {
        match self {
            LoopCount::Infinite => false,
            LoopCount::Finite(k) => completed >= *k,
        }
    }
}

/// Ordered, immutable sequence of decoded frames
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<Frame>,
    canvas: Extent,
    loop_count: LoopCount,
}

impl FrameSet {
    /// Build a frame set; display order is the order of `frames`
    pub fn build(
        frames: Vec<Frame>,
        canvas: Extent,
        loop_count: LoopCount,
    ) -> Result<Self, EmptySequenceError> {
        if frames.is_empty() {
            return Err(EmptySequenceError);
        }

        Ok(Self {
            frames,
            canvas,
            loop_count,
        })
    }

    /// Number of frames, always at least one
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn canvas(&self) -> Extent {
        self.canvas
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    /// Same frames with a different loop count
    pub fn with_loop_count(mut self, loop_count: LoopCount) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Duration of one full pass
    pub fn total_delay(&self) -> Duration {
        self.frames.iter().map(Frame::delay_duration).sum()
    }

    pub fn summary(&self) -> FrameSetSummary {
        FrameSetSummary {
            canvas: self.canvas,
            loop_count: self.loop_count,
            total_delay_ms: self.total_delay().as_millis() as u64,
            frames: self
                .frames
                .iter()
                .enumerate()
                .map(|(index, frame)| FrameSummary {
                    index,
                    region: frame.region(),
                    delay: frame.delay(),
                    disposal: frame.disposal(),
                })
                .collect(),
        }
    }
}

impl Index<usize> for FrameSet {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Pixel-free description of a frame set
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSetSummary {
    pub canvas: Extent,
    pub loop_count: LoopCount,
    pub total_delay_ms: u64,
    pub frames: Vec<FrameSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSummary {
    pub index: usize,
    pub region: Region,
    /// Hundredths of a second
    pub delay: u16,
    pub disposal: Disposal,
}
