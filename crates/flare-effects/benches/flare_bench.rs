use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flare_core::{FlareParams, FrameBuffer, SampleFilter};
use flare_effects::{AnamorphicFlare, FlareProcessor};
use glam::Vec3;

/// Dark frame with a sparse grid of bright dots, so some taps pass the threshold.
fn dotted_frame(width: u32, height: u32) -> FrameBuffer {
    let mut frame = FrameBuffer::filled(width, height, Vec3::splat(0.05));
    for y in (0..height).step_by(16) {
        for x in (0..width).step_by(24) {
            frame.set(x, y, Vec3::new(1.2, 1.0, 0.9));
        }
    }
    frame
}

fn bench_flare_256(c: &mut Criterion) {
    let frame = dotted_frame(256, 256);
    let params = FlareParams::default();
    let flare = AnamorphicFlare::new(SampleFilter::Linear);

    c.bench_function("flare_256x256_linear", |b| {
        b.iter(|| black_box(flare.apply(&frame, &params)));
    });
}

fn bench_flare_nearest_256(c: &mut Criterion) {
    let frame = dotted_frame(256, 256);
    let params = FlareParams::default();
    let flare = AnamorphicFlare::new(SampleFilter::Nearest);

    c.bench_function("flare_256x256_nearest", |b| {
        b.iter(|| black_box(flare.apply(&frame, &params)));
    });
}

fn bench_processor_720p(c: &mut Criterion) {
    let frame = dotted_frame(1280, 720);
    let params = FlareParams::default();
    let mut processor = FlareProcessor::default();

    let mut group = c.benchmark_group("processor");
    group.sample_size(10);
    group.bench_function("flare_1280x720_reused_output", |b| {
        b.iter(|| {
            black_box(processor.process(&frame, &params).len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_flare_256, bench_flare_nearest_256, bench_processor_720p);
criterion_main!(benches);
