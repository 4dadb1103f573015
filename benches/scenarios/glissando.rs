//! A finger dragged across the whole keyboard and back.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::keyboard::{KeyboardConfig, KeyboardSurface, PointerEvent};
use saavy_keys::synth::NoteEvent;

const WIDTH: f32 = 1920.0;
const HEIGHT: f32 = 600.0;

fn glissando(steps: usize, y: f32) -> Vec<PointerEvent> {
    let step = WIDTH / steps as f32;
    let mut events = vec![PointerEvent::Down { x: 1.0, y }];
    events.extend((0..steps).map(|i| PointerEvent::Move {
        x: i as f32 * step,
        y,
    }));
    events.extend((0..steps).rev().map(|i| PointerEvent::Move {
        x: i as f32 * step,
        y,
    }));
    events.push(PointerEvent::Up { x: 1.0, y });
    events
}

pub fn bench_glissando(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/glissando");
    let mut surface = KeyboardSurface::new(&KeyboardConfig::default());
    surface.resize(WIDTH, HEIGHT);
    let mut sink: Vec<NoteEvent> = Vec::with_capacity(1024);

    for steps in [64, 512] {
        // Along the white keys only
        let white = glissando(steps, HEIGHT * 0.9);
        group.bench_with_input(BenchmarkId::new("white", steps), &white, |b, events| {
            b.iter(|| {
                for &event in events {
                    surface.handle(black_box(event), &mut sink);
                }
                sink.clear();
            })
        });

        // Through the black band, mixing both key colours
        let mixed = glissando(steps, HEIGHT * 0.3);
        group.bench_with_input(BenchmarkId::new("black_band", steps), &mixed, |b, events| {
            b.iter(|| {
                for &event in events {
                    surface.handle(black_box(event), &mut sink);
                }
                sink.clear();
            })
        });
    }

    group.finish();
}
