//! Benchmarks for key geometry and hit-testing.

use std::hint::black_box;

use criterion::Criterion;
use saavy_keys::keyboard::KeyboardLayout;

pub fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard/locate");
    let layout = KeyboardLayout::default();
    let geometry = layout.geometry(1920.0, 600.0);

    // Black band: scans the black keys before falling back to a column
    group.bench_function("black_band", |b| {
        b.iter(|| geometry.locate(black_box(137.0), black_box(120.0)))
    });

    // White band: column arithmetic only
    group.bench_function("white_band", |b| {
        b.iter(|| geometry.locate(black_box(137.0), black_box(540.0)))
    });

    // Full sweep across one row, what a fast drag produces
    group.bench_function("sweep_row", |b| {
        b.iter(|| {
            (0..1920)
                .filter_map(|x| geometry.locate(black_box(x as f32), 300.0))
                .count()
        })
    });

    // Rebuilding rectangles on resize
    group.bench_function("geometry", |b| {
        b.iter(|| layout.geometry(black_box(1920.0), black_box(600.0)))
    });

    group.finish();
}
