//! The sacred rules

use crate::state::{RULE_ROWS, SACRED_RULES};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const WARNING: &str = "Violation of these rules may result in banishment from the Labyrinth";

pub fn draw(frame: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let number_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::with_capacity(SACRED_RULES.len() * RULE_ROWS as usize);
    for (index, rule) in SACRED_RULES.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3}. ", index + 1), number_style),
            Span::raw(*rule),
        ]));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(Span::styled(" The Sacred Rules ", number_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(WARNING, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}
