use crate::dsp::{envelope::Envelope, oscillator::SineOscillator};
use crate::pitch::{frequency_of, Pitch};
use crate::{ATTACK_SECONDS, RELEASE_SECONDS, SAMPLE_RATE, VOICE_SECONDS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of every pre-rendered voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceConfig {
    pub sample_rate: u32,
    /// Total buffer length in seconds.
    pub duration: f64,
    pub attack: f64,
    pub release: f64,
}

impl VoiceConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            duration: VOICE_SECONDS,
            attack: ATTACK_SECONDS,
            release: RELEASE_SECONDS,
        }
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate.max(1);
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn attack(mut self, seconds: f64) -> Self {
        self.attack = seconds.max(0.0);
        self
    }

    pub fn release(mut self, seconds: f64) -> Self {
        self.release = seconds.max(0.0);
        self
    }

    /// Number of samples in every voice buffer.
    pub fn sample_count(&self) -> usize {
        (self.duration * self.sample_rate as f64).round() as usize
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::attack_hold_release(
            self.attack,
            self.release,
            self.sample_count(),
            self.sample_rate as f64,
        )
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the 16-bit PCM buffer for `pitch`.
///
/// Pure in `pitch` and `config`: the same inputs always produce a
/// bit-identical buffer of exactly `config.sample_count()` samples.
pub fn generate_voice(pitch: Pitch, config: &VoiceConfig) -> Vec<i16> {
    let n = config.sample_count();
    let osc = SineOscillator::new(frequency_of(pitch), config.sample_rate as f64);
    let env = config.envelope();

    let mut carrier = vec![0.0; n];
    osc.render(0, &mut carrier);
    let mut gains = vec![0.0; n];
    env.render(&mut gains);

    carrier
        .iter()
        .zip(&gains)
        .map(|(&sample, &gain)| {
            let value = sample * gain * i16::MAX as f64;
            // `as` truncates toward zero and saturates at the i16 bounds
            value as i16
        })
        .collect()
}
