use gif_player::{
    decode, decode_all, DecodeError, DecodeStrategy, Disposal, Extent, FrameDescriptor, RawFrame, Region,
};

fn gradient_frame(region: Region, seed: u8) -> RawFrame {
    let pixels = (0..region.extent().buffer_size())
        .map(|i| (i as u8).wrapping_mul(7).wrapping_add(seed))
        .collect();
    RawFrame::new(region, 4 + seed as u16, seed % 4, pixels)
}

fn sample_frames(count: usize) -> Vec<RawFrame> {
    (0..count)
        .map(|i| {
            let i = i as u32;
            gradient_frame(Region::new(i % 8, i % 5, 8 + i % 3, 6), i as u8)
        })
        .collect()
}

/// Descriptor that always fails to produce pixels
struct Broken;

impl FrameDescriptor for Broken {
    fn region(&self) -> Region {
        Region::new(0, 0, 2, 2)
    }

    fn delay(&self) -> u16 {
        0
    }

    fn disposal(&self) -> Disposal {
        Disposal::None
    }

    fn decode_into(&self, _out: &mut [u8]) -> Result<(), DecodeError> {
        Err(DecodeError::MissingPalette)
    }
}

fn failing_index(err: &DecodeError) -> usize {
    match err {
        DecodeError::Frame { index, .. } => *index,
        other => panic!("expected a frame error, got {other:?}"),
    }
}

// ============================================================================
// Single frame
// ============================================================================

#[test]
fn test_decode_copies_metadata_and_pixels() {
    let canvas = Extent::new(16, 16);
    let raw = gradient_frame(Region::new(3, 2, 4, 5), 11);

    let frame = decode(&raw, canvas).unwrap();

    assert_eq!(frame.region(), Region::new(3, 2, 4, 5));
    assert_eq!((frame.x(), frame.y()), (3, 2));
    assert_eq!((frame.width(), frame.height()), (4, 5));
    assert_eq!(frame.delay(), 15);
    assert_eq!(frame.disposal(), Disposal::RestoreToPrevious);
    assert_eq!(frame.pixels(), raw.pixels.as_slice());
    assert_eq!(frame.pixels().len(), 4 * 5 * 4);
}

#[test]
fn test_decode_is_deterministic() {
    let canvas = Extent::new(16, 16);
    let raw = gradient_frame(Region::new(0, 0, 16, 16), 1);

    assert_eq!(decode(&raw, canvas).unwrap(), decode(&raw, canvas).unwrap());
}

#[test]
fn test_region_touching_canvas_edge_is_accepted() {
    let canvas = Extent::new(10, 10);
    let raw = RawFrame::solid(Region::new(6, 7, 4, 3), 1, 0, [1, 2, 3, 255]);
    assert!(decode(&raw, canvas).is_ok());
}

#[test]
fn test_empty_extent_is_rejected() {
    let canvas = Extent::new(10, 10);
    let raw = RawFrame::new(Region::new(0, 0, 0, 4), 1, 0, Vec::new());

    match decode(&raw, canvas) {
        Err(DecodeError::EmptyExtent { width, height }) => assert_eq!((width, height), (0, 4)),
        other => panic!("expected empty extent, got {other:?}"),
    }
}

#[test]
fn test_region_outside_canvas_is_rejected() {
    let canvas = Extent::new(10, 10);
    let raw = RawFrame::solid(Region::new(8, 0, 3, 1), 1, 0, [0, 0, 0, 255]);

    assert!(matches!(
        decode(&raw, canvas),
        Err(DecodeError::OutsideCanvas { .. })
    ));
}

#[test]
fn test_region_overflow_is_rejected() {
    let canvas = Extent::new(10, 10);
    let raw = RawFrame::new(Region::new(u32::MAX, 0, 2, 1), 1, 0, vec![0; 8]);

    assert!(matches!(
        decode(&raw, canvas),
        Err(DecodeError::OutsideCanvas { .. })
    ));
}

#[test]
fn test_oversized_region_is_rejected_before_allocation() {
    let canvas = Extent::new(u32::MAX, u32::MAX);
    let raw = RawFrame::new(Region::full(canvas), 1, 0, Vec::new());

    match decode(&raw, canvas) {
        Err(DecodeError::TooLarge { width, height }) => {
            assert_eq!((width, height), (u32::MAX, u32::MAX));
        }
        other => panic!("expected too large, got {other:?}"),
    }
}

#[test]
fn test_wrong_pixel_count_is_rejected() {
    let canvas = Extent::new(10, 10);
    let raw = RawFrame::new(Region::new(0, 0, 2, 2), 1, 0, vec![0; 12]);

    match decode(&raw, canvas) {
        Err(DecodeError::PixelBufferSize { expected, actual }) => {
            assert_eq!((expected, actual), (16, 12));
        }
        other => panic!("expected size mismatch, got {other:?}"),
    }
}

#[test]
fn test_unknown_disposal_code_means_none() {
    let canvas = Extent::new(2, 2);
    let raw = RawFrame::solid(Region::full(canvas), 1, 7, [0, 0, 0, 255]);
    assert_eq!(decode(&raw, canvas).unwrap().disposal(), Disposal::None);
}

// ============================================================================
// Batch decoding
// ============================================================================

#[test]
fn test_decode_all_preserves_order() {
    let canvas = Extent::new(32, 32);
    let raw = sample_frames(12);

    let frames = decode_all(&raw, canvas, DecodeStrategy::Sequential).unwrap();

    assert_eq!(frames.len(), 12);
    for (frame, source) in frames.iter().zip(&raw) {
        assert_eq!(frame.region(), source.region);
        assert_eq!(frame.pixels(), source.pixels.as_slice());
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let canvas = Extent::new(32, 32);
    let raw = sample_frames(64);

    let sequential = decode_all(&raw, canvas, DecodeStrategy::Sequential).unwrap();
    let parallel = decode_all(&raw, canvas, DecodeStrategy::Parallel).unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_decode_all_of_nothing_is_empty() {
    let raw: Vec<RawFrame> = Vec::new();
    let frames = decode_all(&raw, Extent::new(4, 4), DecodeStrategy::Parallel).unwrap();
    assert!(frames.is_empty());
}

#[test]
fn test_batch_failure_names_lowest_index() {
    let canvas = Extent::new(32, 32);
    let mut raw = sample_frames(40);
    raw[17].pixels.pop();
    raw[31].region = Region::new(30, 30, 8, 8);

    for strategy in [DecodeStrategy::Sequential, DecodeStrategy::Parallel] {
        let err = decode_all(&raw, canvas, strategy).unwrap_err();
        assert_eq!(failing_index(&err), 17, "{strategy:?}");
        assert!(err.to_string().starts_with("frame 17:"));
    }
}

#[test]
fn test_descriptor_error_is_wrapped() {
    let err = decode_all(&[Broken, Broken], Extent::new(4, 4), DecodeStrategy::Parallel).unwrap_err();

    match err {
        DecodeError::Frame { index: 0, source } => {
            assert!(matches!(*source, DecodeError::MissingPalette));
        }
        other => panic!("unexpected error {other:?}"),
    }
}
