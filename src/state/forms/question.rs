//! Question catalogue for the registration forms

/// Identifiers of questions whose answer is free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextId {
    Name,
    Email,
    Address,
    PhoneLast4,
    Reason,
    InviteCode,
}

impl TextId {
    /// Key used in the stored record
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::PhoneLast4 => "phoneLast4",
            Self::Reason => "reason",
            Self::InviteCode => "code",
        }
    }
}

/// Identifiers of questions answered by a yes/no acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AckId {
    AcceptRules,
}

impl AckId {
    /// Key used in the stored record
    pub fn key(&self) -> &'static str {
        match self {
            Self::AcceptRules => "acceptRules",
        }
    }
}

/// How a text answer is entered and checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    ShortText,
    Email,
    /// Exactly `n` ASCII digits
    Digits(usize),
    /// Multi-line text
    Paragraph,
}

/// Identifier and input kind of a question.
///
/// The identifier carries its value type, so a text question can never be
/// declared with a boolean answer or the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text { id: TextId, input: TextInput },
    Acknowledge { id: AckId },
}

/// A single step of a sequential form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    /// Short label shown in the step header and in error messages
    pub label: &'static str,
    /// Prompt revealed character by character before input is allowed
    pub prompt: &'static str,
    /// Hint shown inside an empty input
    pub placeholder: &'static str,
    pub required: bool,
}

impl Question {
    /// Record key of this question
    pub fn key(&self) -> &'static str {
        match self.kind {
            QuestionKind::Text { id, .. } => id.key(),
            QuestionKind::Acknowledge { id } => id.key(),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(
            self.kind,
            QuestionKind::Text {
                input: TextInput::Paragraph,
                ..
            }
        )
    }

    pub fn is_acknowledgment(&self) -> bool {
        matches!(self.kind, QuestionKind::Acknowledge { .. })
    }

    /// Maximum number of characters accepted while typing, if any
    pub fn max_len(&self) -> Option<usize> {
        match self.kind {
            QuestionKind::Text {
                input: TextInput::Digits(n),
                ..
            } => Some(n),
            _ => None,
        }
    }
}

/// The forms a visitor can fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Full trail registration ending with the rules acknowledgment
    Trail,
    /// Short invite request carrying an invite code
    Invite,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Trail => "The Labyrinth Awaits",
            Self::Invite => "Request an Invite",
        }
    }

    /// Ordered questions of this form
    pub fn questions(&self) -> Vec<Question> {
        match self {
            Self::Trail => trail_questions(),
            Self::Invite => invite_questions(),
        }
    }

    /// Whether the stored record carries a `createdAt` timestamp
    pub fn stamps_created_at(&self) -> bool {
        matches!(self, Self::Invite)
    }
}

fn name_question() -> Question {
    Question {
        kind: QuestionKind::Text {
            id: TextId::Name,
            input: TextInput::ShortText,
        },
        label: "Name",
        prompt: "Who approaches the gates of the Labyrinth?",
        placeholder: "State your name, warrior...",
        required: true,
    }
}

fn email_question() -> Question {
    Question {
        kind: QuestionKind::Text {
            id: TextId::Email,
            input: TextInput::Email,
        },
        label: "Email",
        prompt: "Where shall the oracle send word?",
        placeholder: "Any mail..? Your contact sigil...",
        required: true,
    }
}

fn reason_question() -> Question {
    Question {
        kind: QuestionKind::Text {
            id: TextId::Reason,
            input: TextInput::Paragraph,
        },
        label: "Reason",
        prompt: "Why should the OSSPTS accept you?",
        placeholder: "Prove your worth...",
        required: true,
    }
}

fn trail_questions() -> Vec<Question> {
    vec![
        name_question(),
        email_question(),
        Question {
            kind: QuestionKind::Text {
                id: TextId::Address,
                input: TextInput::ShortText,
            },
            label: "Realm",
            prompt: "Where does your presence reside?",
            placeholder: "Write your current realm...",
            required: true,
        },
        Question {
            kind: QuestionKind::Text {
                id: TextId::PhoneLast4,
                input: TextInput::Digits(4),
            },
            label: "Rune stone",
            prompt: "Reveal the last 4 digits of your rune stone (phone number).",
            placeholder: "0000",
            required: true,
        },
        reason_question(),
        Question {
            kind: QuestionKind::Acknowledge {
                id: AckId::AcceptRules,
            },
            label: "Sacred rules",
            prompt: "Do you accept the sacred rules of the Labyrinth?",
            placeholder: "Press Space to accept",
            required: true,
        },
    ]
}

fn invite_questions() -> Vec<Question> {
    vec![
        name_question(),
        email_question(),
        Question {
            kind: QuestionKind::Text {
                id: TextId::InviteCode,
                input: TextInput::Digits(4),
            },
            label: "Invite code",
            prompt: "Speak the four digits you were given.",
            placeholder: "0000",
            required: true,
        },
        reason_question(),
    ]
}
