use crate::pitch::{Pitch, C4, SEMITONES_PER_OCTAVE};

#[cfg(feature = "serde")]
use serde::Serialize;

/*
Keyboard Layout
===============

One function computes where every key sits; drawing and hit-testing both
read its output, so what is under a finger is always what sounds.

White keys
----------

Natural keys are equal-width columns across the whole surface:

    white_width = surface_width / white_key_count
    left(i)     = i * white_width

Black keys
----------

Accidentals sit on top, centred at a fixed offset (in white-key widths)
from the left edge of their octave, where the octave starts at its C:

      C#     D#           F#     G#     A#
     0.65   1.55         3.05   3.95   4.85

    ┌──┬█┬─┬█┬──┬──┬█┬─┬█┬─┬█┬──┐
    │  │█│ │█│  │  │█│ │█│ │█│  │
    │  └┬┘ └┬┘  │  └┬┘ └┬┘ └┬┘  │
    │ C │ D │ E │ F │ G │ A │ B │
    └───┴───┴───┴───┴───┴───┴───┘

Each black key is 0.6 × white_width wide and covers the top 60% of the
surface. The octave's left edge is the white-key index of its C counted
from the first white key of the layout. When the layout does not start
on a C that index can be negative, which keeps every octave on the same
offsets no matter where the keyboard begins.

Hit-testing
-----------

    y in the top 60%?  →  first black key whose [left, right] holds x
    otherwise / miss   →  white column floor(x / white_width), clamped

Black keys win over the white key beneath them.
*/

/// Keys on the default keyboard (three octaves).
pub const KEY_COUNT: usize = 36;

/// Lowest key of the default keyboard.
pub const DEFAULT_START_PITCH: Pitch = C4;

pub const WHITE_KEYS_PER_OCTAVE: usize = 7;

/// Black key width as a fraction of a white key.
pub const BLACK_KEY_WIDTH_RATIO: f32 = 0.6;

/// Black key height as a fraction of the surface.
pub const BLACK_KEY_HEIGHT_RATIO: f32 = 0.6;

/// Centre of each black key within its octave, in white-key widths from C.
pub const BLACK_KEY_OFFSETS: [(u8, f32); 5] = [
    (1, 0.65),  // C#
    (3, 1.55),  // D#
    (6, 3.05),  // F#
    (8, 3.95),  // G#
    (10, 4.85), // A#
];

// Natural pitch classes strictly below each pitch class.
const NATURALS_BELOW: [i32; 12] = [0, 1, 1, 2, 2, 3, 4, 4, 5, 5, 6, 6];

fn naturals_below(pitch: Pitch) -> i32 {
    let octaves = (pitch.value() / SEMITONES_PER_OCTAVE) as i32;
    octaves * WHITE_KEYS_PER_OCTAVE as i32 + NATURALS_BELOW[pitch.pitch_class() as usize]
}

fn black_key_offset(pitch_class: u8) -> f32 {
    BLACK_KEY_OFFSETS
        .iter()
        .find(|(class, _)| *class == pitch_class)
        .map(|(_, offset)| *offset)
        .unwrap_or(0.0)
}

/// One playable key.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub pitch: Pitch,
    /// Black key.
    pub accidental: bool,
    pub label: &'static str,
}

impl Key {
    pub fn new(pitch: Pitch) -> Self {
        Self {
            pitch,
            accidental: pitch.is_accidental(),
            label: pitch.name(),
        }
    }
}

/// `count` consecutive keys from `start`, stopping at the top of the MIDI range.
pub fn build_keys(start: Pitch, count: usize) -> Vec<Key> {
    (0..count)
        .map_while(|step| u8::try_from(step).ok().and_then(|s| start.checked_add(s)))
        .map(Key::new)
        .collect()
}

/// Drawn (and hit) rectangle of one key, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRect {
    pub pitch: Pitch,
    pub accidental: bool,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl KeyRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Key rectangles for one surface size.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGeometry {
    width: f32,
    height: f32,
    white_width: f32,
    white: Vec<KeyRect>,
    black: Vec<KeyRect>,
}

impl KeyGeometry {
    /// Pitch under `(x, y)`. Out-of-bounds points clamp to the nearest column.
    ///
    /// `None` only for an empty layout or a zero-sized surface.
    pub fn locate(&self, x: f32, y: f32) -> Option<Pitch> {
        if self.white.is_empty() || self.white_width <= 0.0 {
            return None;
        }

        if y <= self.black_band_height() {
            if let Some(key) = self
                .black
                .iter()
                .find(|key| x >= key.left && x <= key.right())
            {
                return Some(key.pitch);
            }
        }

        let column = (x / self.white_width).floor();
        // NaN and negatives land on the first column
        let index = if column >= 0.0 { column as usize } else { 0 };
        let index = index.min(self.white.len() - 1);
        Some(self.white[index].pitch)
    }

    /// White keys, left to right.
    pub fn white_keys(&self) -> &[KeyRect] {
        &self.white
    }

    /// Black keys, left to right.
    pub fn black_keys(&self) -> &[KeyRect] {
        &self.black
    }

    /// All keys in paint order: whites first, blacks on top.
    pub fn paint_order(&self) -> impl Iterator<Item = &KeyRect> {
        self.white.iter().chain(self.black.iter())
    }

    pub fn white_width(&self) -> f32 {
        self.white_width
    }

    pub fn black_band_height(&self) -> f32 {
        self.height * BLACK_KEY_HEIGHT_RATIO
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// The immutable key sequence of one keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardLayout {
    keys: Vec<Key>,
}

impl KeyboardLayout {
    /// Three octaves from `start`.
    pub fn new(start: Pitch) -> Self {
        Self::with_count(start, KEY_COUNT)
    }

    pub fn with_count(start: Pitch, count: usize) -> Self {
        Self {
            keys: build_keys(start, count),
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn start(&self) -> Option<Pitch> {
        self.keys.first().map(|key| key.pitch)
    }

    pub fn white_count(&self) -> usize {
        self.keys.iter().filter(|key| !key.accidental).count()
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        self.keys.iter().any(|key| key.pitch == pitch)
    }

    /// Compute every key rectangle for a `width` × `height` surface.
    pub fn geometry(&self, width: f32, height: f32) -> KeyGeometry {
        let white_count = self.white_count();
        let white_width = if white_count > 0 && width > 0.0 && height > 0.0 {
            width / white_count as f32
        } else {
            0.0
        };

        let white = self
            .keys
            .iter()
            .filter(|key| !key.accidental)
            .enumerate()
            .map(|(index, key)| KeyRect {
                pitch: key.pitch,
                accidental: false,
                left: index as f32 * white_width,
                top: 0.0,
                width: white_width,
                height,
            })
            .collect();

        let black_width = white_width * BLACK_KEY_WIDTH_RATIO;
        let black_height = height * BLACK_KEY_HEIGHT_RATIO;
        let black = match self.start() {
            Some(start) => self
                .keys
                .iter()
                .filter(|key| key.accidental)
                .map(|key| {
                    let octave_left =
                        naturals_below(key.pitch.octave_root()) - naturals_below(start);
                    let center = (octave_left as f32 + black_key_offset(key.pitch.pitch_class()))
                        * white_width;
                    KeyRect {
                        pitch: key.pitch,
                        accidental: true,
                        left: center - black_width / 2.0,
                        top: 0.0,
                        width: black_width,
                        height: black_height,
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        KeyGeometry {
            width,
            height,
            white_width,
            white,
            black,
        }
    }

    /// Pitch under `(x, y)` on a `width` × `height` surface.
    pub fn locate(&self, x: f32, y: f32, width: f32, height: f32) -> Option<Pitch> {
        self.geometry(width, height).locate(x, y)
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::new(DEFAULT_START_PITCH)
    }
}
