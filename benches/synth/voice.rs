//! Benchmarks for per-pitch voice generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::{generate_voice, VoiceConfig};
use saavy_keys::io::converter::encode_pcm16_le;
use saavy_keys::pitch::{A4, C3, C6};

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/voice");
    let config = VoiceConfig::new();

    // Full 2s voice, the work done on the first press of a key
    for pitch in [C3, A4, C6] {
        group.bench_with_input(BenchmarkId::new("generate", pitch), &pitch, |b, &pitch| {
            b.iter(|| generate_voice(black_box(pitch), black_box(&config)))
        });
    }

    // PCM16 LE encoding for upload
    let samples = generate_voice(A4, &config);
    group.bench_function("encode_pcm16_le", |b| {
        b.iter(|| encode_pcm16_le(black_box(&samples)))
    });

    group.finish();
}
