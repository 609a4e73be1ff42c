//! Landing menu

use super::components::{render_button, BUTTON_HEIGHT};
use super::layout::centered_rect;
use crate::state::LandingOption;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MENU_WIDTH: u16 = 44;

pub fn draw(frame: &mut Frame, area: Rect, selected: usize) {
    let options = LandingOption::ALL;
    let menu_height = 3 + options.len() as u16 * BUTTON_HEIGHT + 2;
    let menu_area = centered_rect(area, MENU_WIDTH, menu_height);

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(options.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Length(2));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(menu_area);

    let header = vec![
        Line::from(Span::styled(
            "THE LABYRINTH",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Choose your path, seeker",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    for (index, option) in options.iter().enumerate() {
        let label = format!("{}  {}", index + 1, option.label());
        render_button(frame, chunks[index + 1], &label, index == selected, true);
    }

    let description = options
        .get(selected)
        .map(LandingOption::description)
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            description,
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center),
        chunks[options.len() + 1],
    );
}
