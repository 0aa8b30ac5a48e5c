use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gif_player::{decode_all, DecodeStrategy, Extent, RawFrame, Region};

/// Full-canvas frames with distinct contents
fn frames(count: usize, canvas: Extent) -> Vec<RawFrame> {
    (0..count)
        .map(|i| {
            let region = Region::full(canvas);
            let pixels = (0..region.extent().buffer_size())
                .map(|p| (p + i) as u8)
                .collect();
            RawFrame::new(region, 4, (i % 4) as u8, pixels)
        })
        .collect()
}

/// Benchmark: decode a batch sequentially vs on the rayon pool
fn bench_decode_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_all");

    for &(count, size) in &[(16usize, 64u32), (64, 128), (32, 480)] {
        let canvas = Extent::new(size, size);
        let raw = frames(count, canvas);
        let label = format!("{count}x{size}px");

        for strategy in [DecodeStrategy::Sequential, DecodeStrategy::Parallel] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), &label),
                &raw,
                |b, raw| b.iter(|| decode_all(black_box(raw), canvas, strategy).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_decode_all);
criterion_main!(benches);
