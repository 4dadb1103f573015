//! Keyboard widget
//!
//! Every cell is coloured by asking the geometry which key sits under the
//! cell centre, the same query a click on that cell makes. What you see is
//! what you hit.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use saavy_keys::keyboard::{KeyGeometry, KeyboardSurface};

const WHITE: Color = Color::Rgb(0xFD, 0xFD, 0xFD);
const WHITE_PRESSED: Color = Color::Rgb(0xFF, 0xE5, 0xE5);
const BLACK: Color = Color::Rgb(0x11, 0x11, 0x11);
const BLACK_PRESSED: Color = Color::Rgb(0xFF, 0x7B, 0x7B);
const SEPARATOR: Color = Color::Rgb(0x80, 0x80, 0x80);

fn key_color(accidental: bool, pressed: bool) -> Color {
    match (accidental, pressed) {
        (false, false) => WHITE,
        (false, true) => WHITE_PRESSED,
        (true, false) => BLACK,
        (true, true) => BLACK_PRESSED,
    }
}

pub struct KeyboardWidget<'a> {
    surface: &'a KeyboardSurface,
}

impl<'a> KeyboardWidget<'a> {
    pub fn new(surface: &'a KeyboardSurface) -> Self {
        Self { surface }
    }
}

/// True when a new white key starts in column `col`.
fn white_boundary(geometry: &KeyGeometry, col: u16) -> bool {
    let width = geometry.white_width();
    if col == 0 || width <= 0.0 {
        return false;
    }
    let here = ((col as f32 + 0.5) / width).floor();
    let before = ((col as f32 - 0.5) / width).floor();
    here != before
}

impl Widget for KeyboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = self.surface.geometry();
        let pressed = self.surface.pressed().snapshot();

        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as f32 + 0.5, row as f32 + 0.5);
                let Some(pitch) = geometry.locate(x, y) else {
                    continue;
                };
                let accidental = pitch.is_accidental();
                let bg = key_color(accidental, pressed.contains(&pitch));

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_bg(bg);
                    if !accidental && white_boundary(geometry, col) {
                        cell.set_char('▏').set_fg(SEPARATOR);
                    } else {
                        cell.set_char(' ');
                    }
                }
            }
        }

        // Octave labels along the bottom of each C
        if area.height == 0 {
            return;
        }
        let label_y = area.y + area.height - 1;
        for key in geometry.white_keys() {
            if key.pitch.pitch_class() != 0 {
                continue;
            }
            let label = key.pitch.to_string();
            let start = area.x + (key.left.ceil() as u16).saturating_add(1);
            let bg = key_color(false, pressed.contains(&key.pitch));
            for (i, ch) in label.chars().enumerate() {
                let x = start.saturating_add(i as u16);
                if x as f32 >= area.x as f32 + key.right() || x >= area.right() {
                    break;
                }
                if let Some(cell) = buf.cell_mut((x, label_y)) {
                    cell.set_char(ch).set_fg(Color::DarkGray).set_bg(bg);
                }
            }
        }
    }
}
