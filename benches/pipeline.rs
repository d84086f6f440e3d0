//! Benchmarks for the per-pixel pass and the full render
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixelfilter::prelude::*;

/// Generate a synthetic RGBA gradient
fn generate_test_image(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(((x + y) * 255 / (width + height)) as u8);
            data.push(255);
        }
    }
    PixelBuffer::new(width, height, data).expect("valid test image")
}

fn busy_params() -> FilterParameters {
    FilterParameters::new()
        .with(FilterKind::Saturate, 1.3)
        .with(FilterKind::Hue, 30.0)
        .with(FilterKind::Brightness, 1.1)
        .with(FilterKind::Contrast, 1.2)
        .with(FilterKind::Sepia, 0.4)
        .with(FilterKind::Opacity, 0.9)
}

/// Benchmark the per-pixel pass, sequential against row-parallel
fn bench_pipeline_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_pass");
    let params = busy_params();

    for size in [256, 512, 1024].iter() {
        let width = *size;
        let height = *size;
        let image = generate_test_image(width, height);

        group.throughput(Throughput::Elements((width * height) as u64));

        for (label, parallel) in [("sequential", false), ("parallel", true)] {
            let runner = PipelineRunner::with_options(
                ExecutionOptions::new()
                    .with_parallel(parallel)
                    .with_min_parallel_pixels(0),
            );
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}x{}", width, height)),
                &image,
                |b, image| {
                    b.iter(|| runner.run(black_box(image), black_box(&params)));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark a full render with blur and border
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for kind in [BlurKind::Gaussian, BlurKind::Box] {
        let mut session = EditSession::new(generate_test_image(512, 512)).with_blur(kind);
        let settings = [
            (FilterKind::Hue, 45.0),
            (FilterKind::Blur, 3.0),
            (FilterKind::Border, 12.0),
        ];
        for (filter, value) in settings {
            session.set(filter, value);
        }

        group.bench_function(BenchmarkId::new("512x512", format!("{:?}", kind)), |b| {
            b.iter(|| session.render())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline_pass, bench_render);
criterion_main!(benches);
