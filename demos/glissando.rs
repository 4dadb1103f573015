//! Drag a pointer across one octave of white keys and bounce the result
//! through the mixer offline, printing each key change and its level.
//!
//! cargo run --example glissando

use std::collections::BTreeSet;

use saavy_keys::{
    dsp::VoiceConfig,
    keyboard::{KeyboardConfig, KeyboardSurface, PointerEvent},
    synth::{
        mixer::{mixer_pair, MixerConfig},
        VoiceCache,
    },
    MAX_BLOCK_SIZE,
};

const WIDTH: f32 = 2_100.0;
const HEIGHT: f32 = 200.0;
const BLOCKS_PER_KEY: usize = 4;

fn main() {
    let (backend, mut mixer) = mixer_pair(MixerConfig::default());
    let mut voices = VoiceCache::new(backend, VoiceConfig::new().duration(0.5));
    let mut surface = KeyboardSurface::new(&KeyboardConfig::default());
    surface.resize(WIDTH, HEIGHT);

    // Low on the keys so only white keys are hit
    let y = HEIGHT * 0.9;
    let stops: Vec<f32> = surface
        .geometry()
        .white_keys()
        .iter()
        .take(8)
        .map(|key| key.left + key.width / 2.0)
        .collect();

    let mut block = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut rendered = 0;
    let mut previous = BTreeSet::new();

    for (i, &x) in stops.iter().enumerate() {
        let event = if i == 0 {
            PointerEvent::Down { x, y }
        } else {
            PointerEvent::Move { x, y }
        };
        surface.handle(event, &mut voices);

        let held = surface.pressed().snapshot();
        if held != previous {
            let names: Vec<String> = held.iter().map(|p| p.to_string()).collect();
            print!("[{}]", names.join(" "));
            previous = held;
        }

        let mut peak = 0.0f32;
        for _ in 0..BLOCKS_PER_KEY {
            mixer.render_block(&mut block);
            peak = block.iter().fold(peak, |acc, s| acc.max(s.abs()));
            rendered += block.len();
        }
        println!("  peak {:.3}", peak);
    }

    if let Some(&x) = stops.last() {
        surface.handle(PointerEvent::Up { x, y }, &mut voices);
    }
    voices.release_all();
    mixer.render_block(&mut block);

    println!(
        "Rendered {} samples, {} voices generated",
        rendered,
        voices.generated_count()
    );
}
