//! Offline DSP used to pre-render voices.
//!
//! Voices are rendered once per pitch into a fixed buffer, so these pieces
//! are pure functions of the sample index rather than stateful realtime
//! generators.

/// Linear attack-hold-release gain curve baked into each voice.
pub mod envelope;
/// Index-addressed sine carrier.
pub mod oscillator;
/// Voice rendering: carrier × envelope → PCM16.
pub mod waveform;

pub use envelope::Envelope;
pub use oscillator::SineOscillator;
pub use waveform::{generate_voice, VoiceConfig};
