pub mod dsp; // Offline voice rendering
pub mod io;
pub mod keyboard; // Key layout, hit-testing and gestures
pub mod pitch;
pub mod screen; // Screen lifecycles: keyboard, home, orientation
pub mod synth; // Voice cache and playback

pub use pitch::{frequency_of, Pitch};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Rate every voice is rendered at.
pub const SAMPLE_RATE: u32 = 44_100;
/// Length of each pre-rendered voice.
pub const VOICE_SECONDS: f64 = 2.0;
pub const ATTACK_SECONDS: f64 = 0.01;
pub const RELEASE_SECONDS: f64 = 0.15;
