// Purpose - audio output boundary, PCM format conversions

pub mod converter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SAMPLE_RATE;

/// Bytes per PCM16 sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Format of the PCM handed to the audio output.
///
/// Samples are always signed 16-bit little-endian.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmFormat {
    /// Mono 16-bit at 44.1kHz, the format every voice is rendered in.
    pub const MONO_44K: PcmFormat = PcmFormat {
        sample_rate: SAMPLE_RATE,
        channels: 1,
    };

    pub const fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
        }
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::MONO_44K
    }
}

impl std::fmt::Display for PcmFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, s16le",
            self.sample_rate, self.channels
        )
    }
}
