//! Form domain layer
//!
//! Type-safe questions and answers, validation, the typed prompt reveal, and
//! the controller that walks a visitor through one form.

mod answers;
mod controller;
mod question;
mod reveal;
mod validation;

pub use answers::{AnswerRecord, AnswerValue};
pub use controller::{FormController, FormError, SubmissionOutcome};
pub use question::{AckId, FormKind, Question, TextId};
pub use reveal::{RevealTick, RevealTimer};
