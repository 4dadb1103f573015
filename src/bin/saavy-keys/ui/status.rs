//! Status bar - held notes, audio device and orientation

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use saavy_keys::screen::Orientation;

use super::KeyboardView;

pub fn render_status(frame: &mut Frame, area: Rect, view: &KeyboardView, orientation: Orientation) {
    let surface = view.screen.surface();
    let held: Vec<String> = surface.pressed().iter().map(|p| p.to_string()).collect();
    let held = if held.is_empty() {
        "-".to_string()
    } else {
        held.join(" ")
    };

    let audio_color = if view.audio.is_silent() {
        Color::Yellow
    } else {
        Color::Green
    };

    let line = Line::from(vec![
        Span::styled(" saavy-keys  ", Style::default().fg(Color::Cyan)),
        Span::styled(format!("Held: {:<12} ", held), Style::default().fg(Color::White)),
        Span::styled(
            format!("Voices: {}  ", view.screen.voices().len()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(format!("{}  ", view.audio.status()), Style::default().fg(audio_color)),
        Span::styled(orientation.label(), Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
