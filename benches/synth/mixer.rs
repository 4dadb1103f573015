//! Benchmarks for the realtime mixer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::VoiceConfig;
use saavy_keys::pitch::{C4, E4, G4};
use saavy_keys::synth::mixer::{mixer_pair, MixerConfig};
use saavy_keys::synth::VoiceCache;

use crate::BLOCK_SIZES;

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/mixer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // C major triad at the device rate
        let (backend, mut mixer) = mixer_pair(MixerConfig::new());
        let mut voices = VoiceCache::new(backend, VoiceConfig::new());
        for pitch in [C4, E4, G4] {
            voices.note_on(pitch);
        }
        mixer.drain_commands();

        group.bench_with_input(BenchmarkId::new("triad", size), &size, |b, _| {
            b.iter(|| {
                mixer.render_block(black_box(&mut buffer));
                if mixer.playing_count() == 0 {
                    for pitch in [C4, E4, G4] {
                        voices.note_on(pitch);
                    }
                }
            })
        });

        // Same triad resampled to 48kHz
        let (backend, mut mixer) = mixer_pair(MixerConfig::new().output_rate(48_000));
        let mut voices = VoiceCache::new(backend, VoiceConfig::new());
        for pitch in [C4, E4, G4] {
            voices.note_on(pitch);
        }
        mixer.drain_commands();

        group.bench_with_input(BenchmarkId::new("triad_48k", size), &size, |b, _| {
            b.iter(|| {
                mixer.render_block(black_box(&mut buffer));
                if mixer.playing_count() == 0 {
                    for pitch in [C4, E4, G4] {
                        voices.note_on(pitch);
                    }
                }
            })
        });
    }

    group.finish();
}
