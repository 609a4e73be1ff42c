//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::forms::FormController;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Center a box of at most `width` x `height` inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(" ◆ ", Style::default().fg(Color::Yellow))];

    let hints = match (&app.state.current_view, &app.form) {
        (View::Form(_), Some(form)) => form_hints(form),
        (view, _) => view_hints(view).to_string(),
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for views without a form
fn view_hints(view: &View) -> &'static str {
    match view {
        View::Splash => "Press any key to skip",
        View::Landing => "↑/↓:nav  Enter:select  1-4:jump  q:quit",
        View::Rules => "j/k:scroll  Esc:back",
        View::Form(_) => "",
        View::Submitted(_) => "Enter:return",
    }
}

/// Keyboard hints for the active question
fn form_hints(form: &FormController) -> String {
    if form.is_in_flight() {
        return "Submitting...".to_string();
    }
    if !form.reveal().is_complete() {
        return "Any key:reveal  Esc:leave".to_string();
    }

    let question = form.active_question();
    let mut hints = Vec::new();
    if form.is_last_question() {
        hints.push(format!("Enter/{SUBMIT_SHORTCUT}:submit"));
    } else {
        hints.push("Enter:next".to_string());
    }
    if form.cursor() > 0 {
        hints.push("Shift+Tab:back".to_string());
    }
    if question.is_acknowledgment() {
        hints.push("Space:toggle".to_string());
    }
    if question.is_multiline() {
        hints.push("Alt+Enter:newline".to_string());
    }
    hints.push("Esc:leave".to_string());
    hints.join("  ")
}
