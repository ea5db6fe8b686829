//! End-to-end analyzer benchmarks on in-memory sinks
//!
//! Run with: cargo bench --bench pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dctq_color::convert_planes;
use dctq_core::{Dimensions, Plane, RgbPlanes};
use dctq_encoder::{Analyzer, MemorySinks};

fn test_image(size: u32) -> RgbPlanes {
    let dims = Dimensions::new(size, size);
    RgbPlanes::new(
        Plane::from_fn(dims, |r, c| ((r * 3 + c) % 256) as u8).unwrap(),
        Plane::from_fn(dims, |r, c| ((r ^ c) % 256) as u8).unwrap(),
        Plane::from_fn(dims, |r, c| ((r * c) % 256) as u8).unwrap(),
    )
    .unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analyzer");
    let analyzer = Analyzer::default();

    for &size in &[128u32, 512] {
        let image = test_image(size);
        group.throughput(Throughput::Elements(image.dimensions().pixel_count() as u64));

        group.bench_function(format!("color_{}x{}", size, size), |b| {
            b.iter(|| convert_planes(black_box(&image)).unwrap());
        });

        let planes = convert_planes(&image).unwrap();
        group.bench_function(format!("analyze_{}x{}", size, size), |b| {
            b.iter(|| analyzer.analyze(black_box(&planes), &mut MemorySinks::new()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
