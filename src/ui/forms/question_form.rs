//! One step of a sequential form

use super::field_renderer::draw_answer;
use crate::state::forms::{AnswerValue, FormController, SubmissionOutcome};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const FORM_WIDTH: u16 = 72;
const HEADER_HEIGHT: u16 = 3;
const PROMPT_HEIGHT: u16 = 3;

/// Draw the active question of `form`
pub fn draw(frame: &mut Frame, area: Rect, form: &FormController) {
    let question = form.active_question();
    let input_height = if question.is_multiline() { 7 } else { 3 };
    let height = HEADER_HEIGHT + 1 + PROMPT_HEIGHT + input_height + 1 + BUTTON_HEIGHT;
    let form_area = centered_rect(area, FORM_WIDTH, height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(PROMPT_HEIGHT),
            Constraint::Length(input_height),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(form_area);

    draw_header(frame, chunks[0], form);
    draw_prompt(frame, chunks[2], form);
    draw_answer(
        frame,
        chunks[3],
        question,
        form.answers(),
        form.is_interactive(),
    );
    draw_status_line(frame, chunks[4], form);
    draw_buttons(frame, chunks[5], form);
}

fn draw_header(frame: &mut Frame, area: Rect, form: &FormController) {
    let total = form.questions().len();
    let step = form.cursor() + 1;

    let progress: Vec<Span> = (0..total)
        .map(|i| {
            if i < step {
                Span::styled("◆ ", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("◇ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let lines = vec![
        Line::from(Span::styled(
            form.form().title(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Question {step} of {total}"),
            Style::default().fg(Color::Gray),
        )),
        Line::from(progress),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_prompt(frame: &mut Frame, area: Rect, form: &FormController) {
    let reveal = form.reveal();
    let mut spans = vec![Span::styled(
        reveal.revealed_text(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if !reveal.is_complete() {
        spans.push(Span::styled("▌", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
        area,
    );
}

/// One line under the input: submission progress, last failure or a live validation hint
fn draw_status_line(frame: &mut Frame, area: Rect, form: &FormController) {
    let line = match form.outcome() {
        SubmissionOutcome::InFlight => Some(Span::styled(
            "Sending your answers to the oracle...",
            Style::default().fg(Color::Yellow),
        )),
        SubmissionOutcome::Failed { reason } => Some(Span::styled(
            format!("The oracle could not record your answers: {reason}"),
            Style::default().fg(Color::Red),
        )),
        _ => live_validation_hint(form)
            .map(|hint| Span::styled(hint, Style::default().fg(Color::DarkGray))),
    };

    if let Some(span) = line {
        frame.render_widget(Paragraph::new(Line::from(span)), area);
    }
}

/// Validation message for a partly typed answer
fn live_validation_hint(form: &FormController) -> Option<String> {
    let typed = matches!(
        form.answers().value(form.active_question()),
        Some(AnswerValue::Text(ref value)) if !value.trim().is_empty()
    );
    if !typed {
        return None;
    }
    form.validate_active().err().map(|err| err.to_string())
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &FormController) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let in_flight = form.is_in_flight();
    let can_go_back = form.cursor() > 0 && !in_flight;
    render_button(frame, chunks[0], "Previous", false, can_go_back);

    let label = if in_flight {
        "Submitting..."
    } else if form.is_last_question() {
        "Submit"
    } else {
        "Next"
    };
    render_button(frame, chunks[1], label, true, form.is_interactive());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FormKind, TextId};
    use crate::store::StoreError;
    use crate::ui::test_support::render;

    fn invite_at_last() -> FormController {
        let mut form = FormController::new(FormKind::Invite, "labyrinth_invites").without_reveal();
        form.set_text(TextId::Name, "Ariadne");
        form.advance().unwrap();
        form.set_text(TextId::Email, "ariadne@crete.gr");
        form.advance().unwrap();
        form.set_text(TextId::InviteCode, "0451");
        form.advance().unwrap();
        form.set_text(TextId::Reason, "I hold the thread.");
        form
    }

    #[test]
    fn test_first_step_header_and_prompt() {
        let form = FormController::new(FormKind::Trail, "labyrinth_invites").without_reveal();
        let screen = render(80, 24, |frame, area| draw(frame, area, &form));
        assert!(screen.contains("Question 1 of 6"));
        assert!(screen.contains("Who approaches the gates of the Labyrinth?"));
        assert!(screen.contains("Next"));
    }

    #[test]
    fn test_partial_reveal_shows_prefix() {
        let mut form = FormController::new(FormKind::Trail, "labyrinth_invites");
        for _ in 0..3 {
            form.tick_reveal();
        }
        let screen = render(80, 24, |frame, area| draw(frame, area, &form));
        assert!(screen.contains("Who▌"));
        assert!(!screen.contains("approaches"));
    }

    #[test]
    fn test_last_step_offers_submit() {
        let form = invite_at_last();
        let screen = render(80, 24, |frame, area| draw(frame, area, &form));
        assert!(screen.contains("Question 4 of 4"));
        assert!(screen.contains("Submit"));
    }

    #[test]
    fn test_in_flight_shows_submitting() {
        let mut form = invite_at_last();
        form.begin_submit().unwrap();
        let screen = render(80, 24, |frame, area| draw(frame, area, &form));
        assert!(screen.contains("Submitting..."));
        assert!(screen.contains("Sending your answers to the oracle..."));
    }

    #[test]
    fn test_failure_is_reported_under_input() {
        let mut form = invite_at_last();
        form.begin_submit().unwrap();
        form.finish_submit(&Err(StoreError::InvalidPath)).unwrap();
        let screen = render(100, 24, |frame, area| draw(frame, area, &form));
        assert!(screen.contains("The oracle could not record your answers"));
    }

    #[test]
    fn test_live_hint_for_bad_digits() {
        let mut form = FormController::new(FormKind::Invite, "labyrinth_invites").without_reveal();
        form.set_text(TextId::Name, "Ariadne");
        form.advance().unwrap();
        form.set_text(TextId::Email, "ariadne@crete.gr");
        form.advance().unwrap();
        form.set_text(TextId::InviteCode, "04");

        assert_eq!(
            live_validation_hint(&form).as_deref(),
            Some("Invite code must be exactly 4 digits")
        );
    }

    #[test]
    fn test_no_live_hint_for_empty_answer() {
        let form = FormController::new(FormKind::Trail, "labyrinth_invites").without_reveal();
        assert_eq!(live_validation_hint(&form), None);
    }
}
