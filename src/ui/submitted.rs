//! Confirmation after a recorded submission

use super::layout::centered_rect;
use crate::state::forms::FormKind;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn message(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Trail => "The labyrinth whispers of your approach. Await our sign when the stars align.",
        FormKind::Invite => "Your invite has been received. The keepers will weigh your code in silence.",
    }
}

pub fn draw(frame: &mut Frame, area: Rect, kind: FormKind, entry_id: Option<&str>) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Your Path is Recorded",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message(kind)),
    ];
    if let Some(id) = entry_id {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Mark: ", Style::default().fg(Color::DarkGray)),
            Span::styled(id.to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to return",
        Style::default().fg(Color::DarkGray),
    )));

    let box_area = centered_rect(area, 60, lines.len() as u16 + 4);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        box_area,
    );
}
