//! Benchmarks for the block transform and quantization
//!
//! Run with: cargo bench --bench transforms

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dctq_core::{Dimensions, Plane};
use dctq_transform::{quantize, DctMatrix, DCT_MATRIX, LUMA_QUANT_TABLE};

fn bench_block_dct(c: &mut Criterion) {
    let mut group = c.benchmark_group("DCT 8x8");
    let input: [f32; 64] = core::array::from_fn(|i| (i as f32) - 32.0);

    group.bench_function("forward", |b| {
        b.iter(|| DCT_MATRIX.forward(black_box(&input)));
    });

    let coeffs = DCT_MATRIX.forward(&input);
    group.bench_function("inverse", |b| {
        b.iter(|| DCT_MATRIX.inverse(black_box(&coeffs)));
    });

    group.bench_function("basis_construction", |b| {
        b.iter(DctMatrix::new);
    });

    group.bench_function("quantize", |b| {
        let mut out = [0i16; 64];
        b.iter(|| quantize(black_box(&coeffs), &LUMA_QUANT_TABLE, black_box(&mut out)));
    });

    group.finish();
}

fn bench_plane_dct(c: &mut Criterion) {
    let mut group = c.benchmark_group("DCT Plane");

    for &size in &[64u32, 256, 512] {
        let plane = Plane::from_fn(Dimensions::new(size, size), |r, c| ((r + c) % 256) as f32 - 128.0)
            .unwrap();
        group.throughput(Throughput::Elements(plane.dimensions().pixel_count() as u64));
        group.bench_function(format!("{}x{}", size, size), |b| {
            b.iter(|| DCT_MATRIX.transform_plane(black_box(&plane)).count());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_dct, bench_plane_dct);
criterion_main!(benches);
