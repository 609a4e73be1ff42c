//! Sequential form controller
//!
//! Drives one form session: a cursor over an immutable list of questions,
//! the answer record, the prompt reveal that gates input, and the lifecycle
//! of the single submission to the append store.

use super::answers::AnswerRecord;
use super::question::{AckId, FormKind, Question, QuestionKind, TextId};
use super::reveal::{RevealState, RevealTick, RevealTimer};
use super::validation::{validate_all, validate_field, ValidationError};
use crate::store::{AppendStore, StoreError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

/// Why a controller action was refused
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("the question is still being revealed")]
    RevealPending,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("this form has already been submitted")]
    AlreadySubmitted,
    #[error("answer every question before submitting")]
    NotAtLastQuestion,
    #[error("no submission is in flight")]
    NoActiveSubmission,
    #[error("failed to encode answers: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Submission(#[from] StoreError),
}

/// Where the session's submission stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionOutcome {
    #[default]
    NotAttempted,
    InFlight,
    Succeeded {
        entry_id: String,
    },
    Failed {
        reason: String,
    },
}

impl SubmissionOutcome {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}

/// One append to perform against the store
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub path: String,
    pub record: Value,
}

impl SubmissionRequest {
    /// Append the record to the store, returning the new entry id
    pub async fn send(self, store: &dyn AppendStore) -> Result<String, StoreError> {
        store.append(&self.path, self.record).await
    }
}

/// State of one run through a form
#[derive(Debug)]
pub struct FormController {
    form: FormKind,
    collection: String,
    stamps_created_at: bool,
    questions: Vec<Question>,
    answers: AnswerRecord,
    cursor: usize,
    outcome: SubmissionOutcome,
    reveal: RevealState,
    reveal_enabled: bool,
    timer: Option<RevealTimer>,
}

impl FormController {
    /// Start a session for `form` that appends to `collection`.
    ///
    /// The first prompt starts unrevealed; ticks are applied with
    /// [`FormController::tick_reveal`] or by an attached [`RevealTimer`].
    pub fn new(form: FormKind, collection: impl Into<String>) -> Self {
        Self::with_questions(form, form.questions(), collection, form.stamps_created_at())
    }

    /// Start a session over an arbitrary ordered question set.
    ///
    /// `stamps_created_at` adds a `createdAt` timestamp to the stored record.
    /// The set must not be empty.
    pub fn with_questions(
        form: FormKind,
        questions: Vec<Question>,
        collection: impl Into<String>,
        stamps_created_at: bool,
    ) -> Self {
        debug_assert!(!questions.is_empty(), "a form needs at least one question");
        let answers = AnswerRecord::for_questions(&questions);
        let reveal = RevealState::new(questions.first().map_or("", |q| q.prompt));
        Self {
            form,
            collection: collection.into(),
            stamps_created_at,
            questions,
            answers,
            cursor: 0,
            outcome: SubmissionOutcome::NotAttempted,
            reveal,
            reveal_enabled: true,
            timer: None,
        }
    }

    /// Show every prompt in full as soon as it becomes active
    pub fn without_reveal(mut self) -> Self {
        self.reveal_enabled = false;
        self.reveal.finish();
        self.cancel_timer();
        self
    }

    /// Drive the reveal from a repeating timer and start it for the active prompt
    pub fn with_reveal_timer(mut self, timer: RevealTimer) -> Self {
        self.timer = Some(timer);
        if self.reveal_enabled && !self.reveal.is_complete() {
            self.restart_timer();
        }
        self
    }

    pub fn form(&self) -> FormKind {
        self.form
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    /// The question at the cursor
    pub fn active_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    pub fn is_last_question(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    pub fn is_in_flight(&self) -> bool {
        self.outcome.is_in_flight()
    }

    /// Whether the active input accepts keys
    pub fn is_interactive(&self) -> bool {
        self.reveal.is_complete() && !self.is_in_flight()
    }

    /// Validation result of the active question
    pub fn validate_active(&self) -> Result<(), ValidationError> {
        validate_field(self.active_question(), &self.answers)
    }

    /// Move to the next question.
    ///
    /// Refused while submitting, while the prompt is still being revealed, or
    /// when the active answer does not validate. A no-op on the last question.
    pub fn advance(&mut self) -> Result<(), FormError> {
        if self.is_in_flight() {
            return Err(FormError::SubmissionInFlight);
        }
        if !self.reveal.is_complete() {
            return Err(FormError::RevealPending);
        }
        self.validate_active()?;

        if !self.is_last_question() {
            tracing::debug!("Answered {}", self.active_question().key());
            self.move_cursor(self.cursor + 1);
        }
        Ok(())
    }

    /// Move to the previous question regardless of validation. A no-op on the first question.
    pub fn retreat(&mut self) -> Result<(), FormError> {
        if self.is_in_flight() {
            return Err(FormError::SubmissionInFlight);
        }
        if self.cursor > 0 {
            self.move_cursor(self.cursor - 1);
        }
        Ok(())
    }

    /// Replace a text answer without validating it
    #[allow(dead_code)] // whole-value edits; the key handler types character by character
    pub fn set_text(&mut self, id: TextId, value: impl Into<String>) -> bool {
        self.answers.set_text(id, value)
    }

    /// Replace an acknowledgment without validating it
    pub fn set_ack(&mut self, id: AckId, value: bool) -> bool {
        self.answers.set_ack(id, value)
    }

    /// Type a character into the active question
    pub fn push_char(&mut self, c: char) {
        if !self.is_interactive() {
            return;
        }
        if let QuestionKind::Text { id, .. } = self.active_question().kind {
            let max_len = self.active_question().max_len();
            let current = self.answers.text(id).map_or(0, |s| s.chars().count());
            if max_len.is_some_and(|max| current >= max) {
                return;
            }
            self.answers.push_char(id, c);
        }
    }

    /// Delete the last character of the active question
    pub fn pop_char(&mut self) {
        if !self.is_interactive() {
            return;
        }
        if let QuestionKind::Text { id, .. } = self.active_question().kind {
            self.answers.pop_char(id);
        }
    }

    /// Flip the active acknowledgment
    pub fn toggle_ack(&mut self) {
        if !self.is_interactive() {
            return;
        }
        if let QuestionKind::Acknowledge { id } = self.active_question().kind {
            let checked = self.answers.ack(id).unwrap_or(false);
            self.set_ack(id, !checked);
        }
    }

    /// Reveal one more character of the active prompt
    pub fn tick_reveal(&mut self) {
        if self.reveal.tick() {
            self.cancel_timer();
        }
    }

    /// Apply a tick from the attached timer, ignoring ticks of cancelled runs
    pub fn on_reveal_tick(&mut self, tick: RevealTick) {
        let accepted = self.timer.as_ref().is_some_and(|t| t.accepts(tick));
        if accepted {
            self.tick_reveal();
        }
    }

    /// Show the active prompt in full
    pub fn finish_reveal(&mut self) {
        self.reveal.finish();
        self.cancel_timer();
    }

    /// Start a submission.
    ///
    /// Requires the cursor on the last question with its prompt revealed,
    /// every question valid and no submission in flight. Marks the session
    /// in flight and returns the append to perform.
    pub fn begin_submit(&mut self) -> Result<SubmissionRequest, FormError> {
        self.begin_submit_at(Utc::now())
    }

    fn begin_submit_at(&mut self, now: DateTime<Utc>) -> Result<SubmissionRequest, FormError> {
        match self.outcome {
            SubmissionOutcome::InFlight => return Err(FormError::SubmissionInFlight),
            SubmissionOutcome::Succeeded { .. } => return Err(FormError::AlreadySubmitted),
            SubmissionOutcome::NotAttempted | SubmissionOutcome::Failed { .. } => {}
        }
        if !self.is_last_question() {
            return Err(FormError::NotAtLastQuestion);
        }
        if !self.reveal.is_complete() {
            return Err(FormError::RevealPending);
        }
        validate_all(&self.questions, &self.answers)?;

        let mut record = serde_json::to_value(&self.answers)?;
        if self.stamps_created_at {
            if let Value::Object(map) = &mut record {
                map.insert(
                    "createdAt".to_string(),
                    Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
                );
            }
        }

        self.outcome = SubmissionOutcome::InFlight;
        tracing::info!("Submitting {:?} form to {}", self.form, self.collection);
        Ok(SubmissionRequest {
            path: self.collection.clone(),
            record,
        })
    }

    /// Settle the in-flight submission with the store's answer.
    ///
    /// A failure leaves the answers and cursor untouched so the visitor can retry.
    pub fn finish_submit(&mut self, result: &Result<String, StoreError>) -> Result<(), FormError> {
        if !self.is_in_flight() {
            return Err(FormError::NoActiveSubmission);
        }
        self.outcome = match result {
            Ok(entry_id) => {
                tracing::info!("Submission recorded as {entry_id}");
                SubmissionOutcome::Succeeded {
                    entry_id: entry_id.clone(),
                }
            }
            Err(err) => {
                tracing::error!("Submission error: {err}");
                SubmissionOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
        Ok(())
    }

    /// Run a whole submission against `store`, returning the new entry id.
    ///
    /// The UI loop performs the same three steps with the send moved onto a
    /// background task so it can keep drawing.
    #[allow(dead_code)]
    pub async fn submit(&mut self, store: &dyn AppendStore) -> Result<String, FormError> {
        let request = self.begin_submit()?;
        let result = request.send(store).await;
        self.finish_submit(&result)?;
        result.map_err(FormError::from)
    }

    fn move_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
        let prompt = self.questions[cursor].prompt;
        if self.reveal_enabled {
            self.reveal.restart(prompt);
            self.restart_timer();
        } else {
            self.reveal = RevealState::completed(prompt);
        }
    }

    fn restart_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.restart();
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
    }
}
