//! Application state definitions

use super::forms::FormKind;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Loading screen with the Labyrinth logo
    Splash,
    #[default]
    Landing,
    Rules,
    /// A form session in progress
    Form(FormKind),
    /// Confirmation after a recorded submission
    Submitted(FormKind),
}

/// The sacred rules, in order
pub const SACRED_RULES: [&str; 10] = [
    "The Labyrinth is sacred ground. Enter with respect or not at all.",
    "Never reveal the full secrets of the OSSPTS to outsiders.",
    "Your journey is yours alone. Comparisons breed weakness.",
    "The path changes for each seeker. What worked before may not work again.",
    "When the stars align, the gates will open. Impatience is the first trap.",
    "Truth hides in patterns. Observe the cycles of moon and memory.",
    "Four digits bind you to this realm. Guard them but do not worship them.",
    "The keepers watch in silence. Prove your worth through action, not words.",
    "To leave is to abandon all progress. Return only when called.",
    "The final rule cannot be written, only discovered at journey's end.",
];

/// Rows taken by one rule on the rules screen (the rule and a blank line)
pub const RULE_ROWS: u16 = 2;

/// Entries of the landing menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOption {
    Trail,
    Invite,
    Rules,
    Quit,
}

impl LandingOption {
    pub const ALL: [LandingOption; 4] = [
        LandingOption::Trail,
        LandingOption::Invite,
        LandingOption::Rules,
        LandingOption::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Trail => "Enter the Trail",
            Self::Invite => "Request an Invite",
            Self::Rules => "Sacred Rules",
            Self::Quit => "Leave",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Trail => "Register your path through the Labyrinth",
            Self::Invite => "Redeem the four digits you were given",
            Self::Rules => "Read the rules every seeker must keep",
            Self::Quit => "Return to the mortal world",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Highlighted landing menu entry
    pub landing_selected: usize,
    /// Scroll offset of the rules screen
    pub rules_scroll: u16,
    /// Entry id assigned to the last recorded submission
    pub last_entry_id: Option<String>,
    /// Pending blocking notifications, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    pub fn selected_landing_option(&self) -> LandingOption {
        LandingOption::ALL[self.landing_selected.min(LandingOption::ALL.len() - 1)]
    }

    /// Move the landing highlight down (wraps around)
    pub fn next_landing_option(&mut self) {
        self.landing_selected = (self.landing_selected + 1) % LandingOption::ALL.len();
    }

    /// Move the landing highlight up (wraps around)
    pub fn prev_landing_option(&mut self) {
        if self.landing_selected == 0 {
            self.landing_selected = LandingOption::ALL.len() - 1;
        } else {
            self.landing_selected -= 1;
        }
    }

    /// Queue a blocking notification
    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The notification currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Dismiss the notification currently shown
    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Scroll down, stopping with the last rule at the top
    pub fn scroll_rules_down(&mut self) {
        let max_scroll = (SACRED_RULES.len() as u16 - 1) * RULE_ROWS;
        self.rules_scroll = (self.rules_scroll + 1).min(max_scroll);
    }

    pub fn scroll_rules_up(&mut self) {
        self.rules_scroll = self.rules_scroll.saturating_sub(1);
    }
}
