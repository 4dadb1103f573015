//! Exercise list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::HomeView;

pub fn render_exercises(frame: &mut Frame, area: Rect, home: &mut HomeView) {
    let items: Vec<ListItem> = home
        .exercises
        .iter()
        .map(|exercise| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", exercise.icon.glyph()),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(exercise.title, Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("   {}", exercise.subtitle),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Music Learning ").borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::Rgb(0x2A, 0x2A, 0x3A)))
        .highlight_symbol("▌");

    frame.render_stateful_widget(list, area, &mut home.list);
}
