/*
Pitch
=====

A pitch is a semitone number in standard MIDI numbering: middle C (C4) is
60 and the A440 tuning reference (A4) is 69. Valid values are 0..=127.

The MIDI formula: pitch = 12 * (octave + 1) + pitch_class
Where pitch_class: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

Equal temperament
-----------------

Each semitone multiplies frequency by the twelfth root of two, so an octave
(12 semitones) doubles it:

    frequency = 440 * 2^((pitch - 69) / 12)

  A4 (69) = 440.00 Hz
  A5 (81) = 880.00 Hz
  C4 (60) ≈ 261.63 Hz

Accidentals
-----------

The black keys of a piano are the pitch classes 1, 3, 6, 8 and 10
(C#, D#, F#, G#, A#). Everything else is a natural (white key).
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Note names indexed by pitch class. Accidentals are spelled as sharps.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitones per octave.
pub const SEMITONES_PER_OCTAVE: u8 = 12;

/// Highest valid MIDI pitch.
pub const MAX_PITCH: u8 = 127;

/// Tuning reference: A4 = 440 Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// A semitone identifier in MIDI numbering (0..=127).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch(u8);

impl Pitch {
    /// Returns `None` for values above 127.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_PITCH {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Semitone within the octave (C = 0 .. B = 11).
    pub const fn pitch_class(self) -> u8 {
        self.0 % SEMITONES_PER_OCTAVE
    }

    /// MIDI octave number, C4 = 60 lives in octave 4.
    pub const fn octave(self) -> i8 {
        (self.0 / SEMITONES_PER_OCTAVE) as i8 - 1
    }

    /// True for black keys (sharps/flats).
    pub const fn is_accidental(self) -> bool {
        matches!(self.pitch_class(), 1 | 3 | 6 | 8 | 10)
    }

    pub const fn name(self) -> &'static str {
        NOTE_NAMES[self.pitch_class() as usize]
    }

    /// The C that opens this pitch's octave.
    pub const fn octave_root(self) -> Pitch {
        Pitch(self.0 - self.pitch_class())
    }

    /// Step up by `semitones`, `None` past 127.
    pub fn checked_add(self, semitones: u8) -> Option<Pitch> {
        self.0.checked_add(semitones).and_then(Pitch::new)
    }

    /// Frequency in Hz under equal temperament.
    pub fn frequency(self) -> f64 {
        frequency_of(self)
    }
}

impl TryFrom<u8> for Pitch {
    type Error = InvalidPitch;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Pitch::new(value).ok_or(InvalidPitch(value))
    }
}

impl From<Pitch> for u8 {
    fn from(pitch: Pitch) -> Self {
        pitch.0
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.name(), self.octave())
    }
}

/// A value outside the MIDI pitch range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPitch(pub u8);

impl std::fmt::Display for InvalidPitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pitch {} is outside the MIDI range 0..=127", self.0)
    }
}

impl std::error::Error for InvalidPitch {}

/// Equal-tempered frequency of `pitch`, A4 (69) = 440 Hz.
#[inline]
pub fn frequency_of(pitch: Pitch) -> f64 {
    A4_FREQUENCY * 2.0_f64.powf((pitch.0 as f64 - 69.0) / 12.0)
}

// Named pitches for the octaves the keyboard covers by default.
pub const C3: Pitch = Pitch(48);
pub const A3: Pitch = Pitch(57);
pub const C4: Pitch = Pitch(60);
pub const CS4: Pitch = Pitch(61);
pub const D4: Pitch = Pitch(62);
pub const DS4: Pitch = Pitch(63);
pub const E4: Pitch = Pitch(64);
pub const F4: Pitch = Pitch(65);
pub const FS4: Pitch = Pitch(66);
pub const G4: Pitch = Pitch(67);
pub const GS4: Pitch = Pitch(68);
pub const A4: Pitch = Pitch(69);
pub const AS4: Pitch = Pitch(70);
pub const B4: Pitch = Pitch(71);
pub const C5: Pitch = Pitch(72);
pub const C6: Pitch = Pitch(84);
pub const B6: Pitch = Pitch(95);
