//! TUI module for saavy-keys
//!
//! Home list and keyboard screen. The keyboard is drawn borderless so its
//! cells line up one to one with surface coordinates.

mod home;
mod keyboard;
mod status;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use saavy_keys::screen::Orientation;

use super::app::{HomeView, KeyboardView};

use home::render_exercises;
use keyboard::KeyboardWidget;
use status::render_status;

/// Status bar, keyboard, help bar.
fn keyboard_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(1),    // Keys
            Constraint::Length(1), // Help bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Where the keys are drawn for a terminal of size `area`.
pub fn keyboard_area(area: Rect) -> Rect {
    keyboard_layout(area)[1]
}

pub fn render_keyboard(frame: &mut Frame, view: &KeyboardView, orientation: Orientation) {
    let [status, keys, help] = keyboard_layout(frame.area());

    render_status(frame, status, view, orientation);
    frame.render_widget(KeyboardWidget::new(view.screen.surface()), keys);
    render_help(frame, help, " Click or drag to play  [Esc] Home  [Q] Quit");
}

pub fn render_home(frame: &mut Frame, home: &mut HomeView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Exercise list
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_exercises(frame, chunks[0], home);
    if let Some(notice) = &home.notice {
        let notice = Paragraph::new(format!(" {}", notice)).style(Style::default().fg(Color::Yellow));
        frame.render_widget(notice, chunks[1]);
    }
    render_help(frame, chunks[2], " [Up/Down] Select  [Enter] Open  [Q] Quit");
}

fn render_help(frame: &mut Frame, area: Rect, text: &'static str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
