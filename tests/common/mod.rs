#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use gif_player::core::{ManualClock, PlaybackEngine, TimerQueue};
use gif_player::{decode_all, CompositeSurface, DecodeStrategy, Extent, Frame, FrameSet, LoopCount, RawFrame, Region};

/// Surface call as seen by the recording surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    SetExtent(u32, u32),
    Create(usize),
    Draw { frame: usize, x: u32, y: u32 },
    Clear { x: u32, y: u32, width: u32, height: u32 },
    Snapshot(usize),
    Restore(usize),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("surface failure: {0}")]
pub struct MockError(pub &'static str);

/// Surface that only records calls; frames are told apart by their first pixel's red channel
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Rc<RefCell<Vec<SurfaceCall>>>,
    snapshots: usize,
    pub fail_draws: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Frame ids in draw order
    pub fn draws(&self) -> Vec<usize> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Draw { frame, .. } => Some(*frame),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl CompositeSurface for RecordingSurface {
    type Renderable = usize;
    type Snapshot = usize;
    type Error = MockError;

    fn set_extent(&mut self, width: u32, height: u32) -> Result<(), MockError> {
        self.record(SurfaceCall::SetExtent(width, height));
        Ok(())
    }

    fn create_renderable(&mut self, frame: &Frame) -> Result<usize, MockError> {
        let id = frame.pixels()[0] as usize;
        self.record(SurfaceCall::Create(id));
        Ok(id)
    }

    fn draw_image(&mut self, image: &usize, x: u32, y: u32) -> Result<(), MockError> {
        if self.fail_draws {
            return Err(MockError("draw"));
        }
        self.record(SurfaceCall::Draw { frame: *image, x, y });
        Ok(())
    }

    fn clear_region(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<(), MockError> {
        self.record(SurfaceCall::Clear { x, y, width, height });
        Ok(())
    }

    fn snapshot(&mut self) -> Result<usize, MockError> {
        self.snapshots += 1;
        self.record(SurfaceCall::Snapshot(self.snapshots));
        Ok(self.snapshots)
    }

    fn restore(&mut self, snapshot: &usize) -> Result<(), MockError> {
        self.record(SurfaceCall::Restore(*snapshot));
        Ok(())
    }
}

/// Full-canvas raw frame tagged with `id` in its first pixel
pub fn tagged_frame(id: u8, region: Region, delay: u16, disposal_code: u8) -> RawFrame {
    RawFrame::solid(region, delay, disposal_code, [id, 0, 0, 255])
}

/// 4x4 frame set with one full-canvas frame per delay, tagged 0..n
pub fn frame_set(delays: &[u16], loop_count: LoopCount) -> FrameSet {
    let canvas = Extent::new(4, 4);
    let raw: Vec<RawFrame> = delays
        .iter()
        .enumerate()
        .map(|(id, &delay)| tagged_frame(id as u8, Region::full(canvas), delay, 0))
        .collect();
    frame_set_from(&raw, canvas, loop_count)
}

pub fn frame_set_from(raw: &[RawFrame], canvas: Extent, loop_count: LoopCount) -> FrameSet {
    let frames = decode_all(raw, canvas, DecodeStrategy::Sequential).unwrap();
    FrameSet::build(frames, canvas, loop_count).unwrap()
}

pub type SimEngine = PlaybackEngine<RecordingSurface, TimerQueue<ManualClock>>;

/// Engine on a recording surface and a simulated clock; returns a clock handle
pub fn simulated_engine(frames: FrameSet) -> (SimEngine, ManualClock) {
    let clock = ManualClock::new();
    let engine = PlaybackEngine::new(frames, RecordingSurface::new(), TimerQueue::new(clock.clone())).unwrap();
    (engine, clock)
}
