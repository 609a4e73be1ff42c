//! Field rendering utilities for forms

use crate::state::forms::{AnswerRecord, AnswerValue, Question};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Draw the input for `question` with its current answer
pub fn draw_answer(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    answers: &AnswerRecord,
    is_active: bool,
) {
    match answers.value(question) {
        Some(AnswerValue::Flag(checked)) => {
            draw_checkbox_field(frame, area, question, checked, is_active);
        }
        Some(AnswerValue::Text(value)) => draw_text_field(frame, area, question, &value, is_active),
        None => draw_text_field(frame, area, question, "", is_active),
    }
}

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(question: &Question, is_active: bool) -> Block<'static> {
    let title = if question.required {
        format!(" {} * ", question.label)
    } else {
        format!(" {} ", question.label)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

/// Draw a text or paragraph input
fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    value: &str,
    is_active: bool,
) {
    let cursor_style = Style::default().fg(Color::Yellow);
    let placeholder_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let text_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut lines: Vec<Line> = if value.is_empty() {
        vec![Line::from(Span::styled(question.placeholder, placeholder_style))]
    } else if question.is_multiline() {
        // split('\n') keeps a trailing empty line so the cursor follows a newline
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect()
    } else {
        vec![Line::from(Span::styled(value.to_string(), text_style))]
    };

    if let (true, Some(last)) = (is_active, lines.last_mut()) {
        let cursor = Span::styled(CURSOR, cursor_style);
        if value.is_empty() {
            last.spans.insert(0, cursor);
        } else {
            last.spans.push(cursor);
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(field_block(question, is_active)),
        area,
    );
}

/// Draw a checkbox for an acknowledgment
fn draw_checkbox_field(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    checked: bool,
    is_active: bool,
) {
    let (mark, mark_style) = if checked {
        ("[x]", Style::default().fg(Color::Green))
    } else {
        ("[ ]", Style::default().fg(Color::DarkGray))
    };
    let label = if checked {
        "I accept"
    } else {
        question.placeholder
    };

    let line = Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(label, border_style(is_active)),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(field_block(question, is_active)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{AckId, FormKind, TextId};
    use crate::ui::test_support::render;

    fn trail() -> (Vec<Question>, AnswerRecord) {
        let questions = FormKind::Trail.questions();
        let answers = AnswerRecord::for_questions(&questions);
        (questions, answers)
    }

    #[test]
    fn test_empty_text_shows_placeholder() {
        let (questions, answers) = trail();
        let screen = render(60, 3, |frame, area| {
            draw_answer(frame, area, &questions[0], &answers, true)
        });
        assert!(screen.contains("Name *"));
        assert!(screen.contains("State your name, warrior..."));
    }

    #[test]
    fn test_text_shows_value_with_cursor() {
        let (questions, mut answers) = trail();
        answers.set_text(TextId::Name, "Theseus");
        let screen = render(60, 3, |frame, area| {
            draw_answer(frame, area, &questions[0], &answers, true)
        });
        assert!(screen.contains("Theseus▌"));
    }

    #[test]
    fn test_paragraph_keeps_lines() {
        let (questions, mut answers) = trail();
        answers.set_text(TextId::Reason, "First line\nSecond line");
        let screen = render(60, 5, |frame, area| {
            draw_answer(frame, area, &questions[4], &answers, false)
        });
        let lines: Vec<&str> = screen.lines().collect();
        assert!(lines[1].contains("First line"));
        assert!(lines[2].contains("Second line"));
    }

    #[test]
    fn test_checkbox_reflects_answer() {
        let (questions, mut answers) = trail();
        let unchecked = render(60, 3, |frame, area| {
            draw_answer(frame, area, &questions[5], &answers, true)
        });
        assert!(unchecked.contains("[ ] Press Space to accept"));

        answers.set_ack(AckId::AcceptRules, true);
        let checked = render(60, 3, |frame, area| {
            draw_answer(frame, area, &questions[5], &answers, true)
        });
        assert!(checked.contains("[x] I accept"));
    }
}
