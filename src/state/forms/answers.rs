//! Answer record value objects

use super::question::{AckId, Question, QuestionKind, TextId};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Type-safe answer values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

/// Answers of one form session, keyed by question identifier.
///
/// Only the questions the record was created for are ever present; writes to
/// other identifiers are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    texts: BTreeMap<TextId, String>,
    acks: BTreeMap<AckId, bool>,
}

impl AnswerRecord {
    /// Create a record with every question at its empty default
    pub fn for_questions(questions: &[Question]) -> Self {
        let mut record = Self::default();
        for question in questions {
            match question.kind {
                QuestionKind::Text { id, .. } => {
                    record.texts.insert(id, String::new());
                }
                QuestionKind::Acknowledge { id } => {
                    record.acks.insert(id, false);
                }
            }
        }
        record
    }

    pub fn text(&self, id: TextId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    pub fn ack(&self, id: AckId) -> Option<bool> {
        self.acks.get(&id).copied()
    }

    /// Current value for a question, if it belongs to this record
    pub fn value(&self, question: &Question) -> Option<AnswerValue> {
        match question.kind {
            QuestionKind::Text { id, .. } => self.text(id).map(|s| AnswerValue::Text(s.to_string())),
            QuestionKind::Acknowledge { id } => self.ack(id).map(AnswerValue::Flag),
        }
    }

    /// Replace a text answer. Returns false if the question is not part of this record.
    pub fn set_text(&mut self, id: TextId, value: impl Into<String>) -> bool {
        match self.texts.get_mut(&id) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Replace an acknowledgment. Returns false if the question is not part of this record.
    pub fn set_ack(&mut self, id: AckId, value: bool) -> bool {
        match self.acks.get_mut(&id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Append a character to a text answer
    pub fn push_char(&mut self, id: TextId, c: char) {
        if let Some(slot) = self.texts.get_mut(&id) {
            slot.push(c);
        }
    }

    /// Remove the last character of a text answer
    pub fn pop_char(&mut self, id: TextId) {
        if let Some(slot) = self.texts.get_mut(&id) {
            slot.pop();
        }
    }

    fn len(&self) -> usize {
        self.texts.len() + self.acks.len()
    }
}

impl Serialize for AnswerRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, value) in &self.texts {
            map.serialize_entry(id.key(), value)?;
        }
        for (id, value) in &self.acks {
            map.serialize_entry(id.key(), value)?;
        }
        map.end()
    }
}
