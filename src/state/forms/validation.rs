//! Required-field validation

use super::answers::AnswerRecord;
use super::question::{Question, QuestionKind, TextInput};
use thiserror::Error;

/// Why an answer does not satisfy its question
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Missing { label: &'static str },
    #[error("{label} must be exactly {expected} digits")]
    Digits {
        label: &'static str,
        expected: usize,
    },
    #[error("You must accept: {label}")]
    Unacknowledged { label: &'static str },
}

/// Check one question against the record.
///
/// Questions that are not required always pass. An acknowledgment passes only
/// when it is exactly `true`; every other kind needs a non-empty value after
/// trimming, and digit questions need exactly the declared number of ASCII
/// digits.
pub fn validate_field(question: &Question, record: &AnswerRecord) -> Result<(), ValidationError> {
    if !question.required {
        return Ok(());
    }

    let label = question.label;
    match question.kind {
        QuestionKind::Acknowledge { id } => match record.ack(id) {
            Some(true) => Ok(()),
            _ => Err(ValidationError::Unacknowledged { label }),
        },
        QuestionKind::Text { id, input } => {
            let value = record.text(id).unwrap_or_default().trim();
            if value.is_empty() {
                return Err(ValidationError::Missing { label });
            }
            match input {
                TextInput::Digits(expected) => {
                    if value.chars().count() == expected
                        && value.chars().all(|c| c.is_ascii_digit())
                    {
                        Ok(())
                    } else {
                        Err(ValidationError::Digits { label, expected })
                    }
                }
                TextInput::ShortText | TextInput::Email | TextInput::Paragraph => Ok(()),
            }
        }
    }
}

/// Check every question, reporting the first failure in question order
pub fn validate_all(questions: &[Question], record: &AnswerRecord) -> Result<(), ValidationError> {
    questions
        .iter()
        .try_for_each(|question| validate_field(question, record))
}
