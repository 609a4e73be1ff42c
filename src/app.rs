//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform;
use crate::state::forms::{
    FormController, FormError, FormKind, RevealTick, RevealTimer, SubmissionOutcome,
};
use crate::state::{AppState, LandingOption, SplashState, View};
use crate::store::{AppendStore, FirebaseStore, StoreError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Message shown when a required answer is missing at submit time
const INCOMPLETE_MESSAGE: &str = "Please complete all required fields to proceed.";
/// Message shown when the store refuses or cannot be reached
const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit. Please try again.";

/// Store answer for a submission started by [`App::start_submission`]
#[derive(Debug)]
pub struct SubmissionResult {
    pub form: FormKind,
    pub result: Result<String, StoreError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Active form session
    pub form: Option<FormController>,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
    config: TuiConfig,
    /// Append store shared with submission tasks
    store: Arc<dyn AppendStore>,
    /// Ticks of the active session's reveal timer
    reveal_rx: Option<UnboundedReceiver<RevealTick>>,
    submit_tx: UnboundedSender<SubmissionResult>,
    submit_rx: UnboundedReceiver<SubmissionResult>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App talking to the configured realtime database
    pub fn new(config: TuiConfig) -> Result<Self> {
        let store = FirebaseStore::from_config(&config)?;
        tracing::info!("Using realtime database at {}", config.database_url());
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create an App around an existing store handle
    pub fn with_store(config: TuiConfig, store: Arc<dyn AppendStore>) -> Self {
        let mut state = AppState::default();
        let splash_state = if config.skip_splash() {
            None
        } else {
            state.current_view = View::Splash;
            Some(SplashState::new())
        };
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();

        Self {
            state,
            form: None,
            splash_state,
            config,
            store,
            reveal_rx: None,
            submit_tx,
            submit_rx,
            quit: false,
        }
    }

    /// Update splash animation state
    /// Returns true if animation is complete and we should transition
    pub fn update_splash(&mut self) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update();
            if splash.is_complete() {
                self.splash_state = None;
                self.state.current_view = View::Landing;
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Whether something on screen changes without user input
    pub fn is_animating(&self) -> bool {
        self.in_splash()
            || self
                .form
                .as_ref()
                .is_some_and(|f| !f.reveal().is_complete() || f.is_in_flight())
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Apply reveal ticks and submission results produced in the background
    pub fn poll_background(&mut self) {
        if let (Some(rx), Some(form)) = (self.reveal_rx.as_mut(), self.form.as_mut()) {
            while let Ok(tick) = rx.try_recv() {
                form.on_reveal_tick(tick);
            }
        }

        while let Ok(submission) = self.submit_rx.try_recv() {
            self.settle_submission(submission);
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Splash => self.handle_splash_key(key),
            View::Landing => self.handle_landing_key(key),
            View::Rules => self.handle_rules_key(key),
            View::Form(_) => self.handle_form_key(key),
            View::Submitted(_) => self.handle_submitted_key(key),
        }
        Ok(())
    }

    fn handle_splash_key(&mut self, _key: KeyEvent) {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.prev_landing_option(),
            KeyCode::Down | KeyCode::Char('j') => self.state.next_landing_option(),
            KeyCode::Enter => self.select_landing_option(self.state.selected_landing_option()),
            KeyCode::Char(c @ '1'..='4') => {
                let index = (c as usize) - ('1' as usize);
                self.state.landing_selected = index;
                self.select_landing_option(LandingOption::ALL[index]);
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn select_landing_option(&mut self, option: LandingOption) {
        match option {
            LandingOption::Trail => self.start_form(FormKind::Trail),
            LandingOption::Invite => self.start_form(FormKind::Invite),
            LandingOption::Rules => {
                self.state.rules_scroll = 0;
                self.state.current_view = View::Rules;
            }
            LandingOption::Quit => self.quit = true,
        }
    }

    fn handle_rules_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_rules_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_rules_down(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter | KeyCode::Char('q') => {
                self.state.current_view = View::Landing;
            }
            _ => {}
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
            self.state.last_entry_id = None;
            self.state.current_view = View::Landing;
        }
    }

    /// Begin a new session for `kind`, replacing any previous one
    fn start_form(&mut self, kind: FormKind) {
        let collection = match kind {
            FormKind::Trail => self.config.trail_collection(),
            FormKind::Invite => self.config.invite_collection(),
        };
        let controller = FormController::new(kind, collection);

        // Each session gets its own tick channel so a dropped timer can never
        // feed the next session.
        self.form = Some(match self.config.reveal_interval() {
            Some(interval) => {
                let (tx, rx) = mpsc::unbounded_channel();
                self.reveal_rx = Some(rx);
                controller.with_reveal_timer(RevealTimer::new(interval, tx))
            }
            None => {
                self.reveal_rx = None;
                controller.without_reveal()
            }
        });
        self.state.current_view = View::Form(kind);
        tracing::debug!("Started {kind:?} form");
    }

    fn abandon_form(&mut self) {
        self.form = None;
        self.reveal_rx = None;
        self.state.current_view = View::Landing;
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.state.current_view = View::Landing;
            return;
        };

        if form.is_in_flight() {
            // Nothing may change until the store answers
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let revealing = !form.reveal().is_complete();

        match key.code {
            KeyCode::Esc => self.abandon_form(),
            KeyCode::Char('s') if platform::is_submit_chord(key.modifiers) => {
                self.start_submission()
            }
            _ if revealing => {
                if !matches!(key.code, KeyCode::BackTab | KeyCode::Up) {
                    form.finish_reveal();
                } else if let Err(err) = form.retreat() {
                    tracing::debug!("Retreat refused: {err}");
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Err(err) = form.retreat() {
                    tracing::debug!("Retreat refused: {err}");
                }
            }
            KeyCode::Enter if alt && form.active_question().is_multiline() => form.push_char('\n'),
            KeyCode::Enter if form.is_last_question() => self.start_submission(),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.advance_form(),
            KeyCode::Char(' ') if form.active_question().is_acknowledgment() => form.toggle_ack(),
            KeyCode::Char(c) if !ctrl => form.push_char(c),
            KeyCode::Backspace => form.pop_char(),
            _ => {}
        }
    }

    fn advance_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.advance() {
            Ok(()) => {}
            Err(FormError::Validation(err)) => self.state.push_error(err.to_string()),
            Err(err) => tracing::debug!("Advance refused: {err}"),
        }
    }

    /// Start appending the active form's answers in the background
    fn start_submission(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        match form.begin_submit() {
            Ok(request) => {
                let kind = form.form();
                let store = Arc::clone(&self.store);
                let tx = self.submit_tx.clone();
                tokio::spawn(async move {
                    let result = request.send(store.as_ref()).await;
                    if tx.send(SubmissionResult { form: kind, result }).is_err() {
                        tracing::warn!("Submission finished after the app closed");
                    }
                });
            }
            Err(FormError::Validation(err)) => {
                self.state
                    .push_error(format!("{INCOMPLETE_MESSAGE}\n\n{err}"));
            }
            Err(FormError::SubmissionInFlight) => {}
            Err(err) => self.state.push_error(err.to_string()),
        }
    }

    fn settle_submission(&mut self, submission: SubmissionResult) {
        let Some(form) = self
            .form
            .as_mut()
            .filter(|f| f.form() == submission.form)
        else {
            tracing::warn!("Dropping result for a closed {:?} form", submission.form);
            return;
        };

        if let Err(err) = form.finish_submit(&submission.result) {
            tracing::warn!("Ignoring submission result: {err}");
            return;
        }

        let recorded = match form.outcome() {
            SubmissionOutcome::Succeeded { entry_id } => Some(entry_id.clone()),
            _ => None,
        };
        match recorded {
            Some(entry_id) => {
                self.state.last_entry_id = Some(entry_id);
                self.form = None;
                self.reveal_rx = None;
                self.state.current_view = View::Submitted(submission.form);
            }
            None => self.state.push_error(SUBMIT_FAILED_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{AckId, TextId};
    use crate::store::MockAppendStore;
    use std::time::Duration;

    fn quiet_config() -> TuiConfig {
        TuiConfig {
            skip_splash: Some(true),
            reveal_interval_ms: Some(0),
            ..Default::default()
        }
    }

    fn app_with(store: MockAppendStore) -> App {
        App::with_store(quiet_config(), Arc::new(store))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn answer(app: &mut App, text: &str) {
        type_text(app, text);
        app.handle_key(key(KeyCode::Enter)).unwrap();
    }

    /// Fill the trail form through the keyboard up to the final acknowledgment
    fn fill_trail(app: &mut App) {
        app.handle_key(key(KeyCode::Char('1'))).unwrap();
        answer(app, "Alice");
        answer(app, "alice@olympus.gr");
        answer(app, "Athens");
        answer(app, "1234");
        answer(app, "I solved the riddle.");
        app.handle_key(key(KeyCode::Char(' '))).unwrap();
    }

    async fn wait_for_settle(app: &mut App) {
        for _ in 0..100 {
            app.poll_background();
            if !app.form.as_ref().is_some_and(|f| f.is_in_flight()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("submission never settled");
    }

    mod shell {
        use super::*;

        #[test]
        fn test_should_quit_initially_false() {
            let app = app_with(MockAppendStore::new());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_starts_in_splash_by_default() {
            let app = App::with_store(TuiConfig::default(), Arc::new(MockAppendStore::new()));
            assert!(app.in_splash());
            assert!(app.is_animating());
        }

        #[test]
        fn test_skip_splash_starts_on_landing() {
            let app = app_with(MockAppendStore::new());
            assert_eq!(app.state.current_view, View::Landing);
            assert!(app.splash_state.is_none());
        }

        #[test]
        fn test_splash_key_skips_to_landing() {
            let mut app = App::with_store(TuiConfig::default(), Arc::new(MockAppendStore::new()));
            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert!(app.update_splash());
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[test]
        fn test_update_splash_no_splash_state() {
            let mut app = app_with(MockAppendStore::new());
            assert!(!app.update_splash());
        }

        #[test]
        fn test_error_dialog_is_modal() {
            let mut app = app_with(MockAppendStore::new());
            app.push_error("The gates are closed");
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(!app.state.has_errors());
        }
    }

    mod landing {
        use super::*;

        #[test]
        fn test_navigate_and_open_rules() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Rules);

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[test]
        fn test_number_key_starts_invite_form() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Char('2'))).unwrap();
            assert_eq!(app.state.current_view, View::Form(FormKind::Invite));
            assert_eq!(app.form.as_ref().unwrap().form(), FormKind::Invite);
        }

        #[test]
        fn test_quit_option() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Char('4'))).unwrap();
            assert!(app.should_quit());
        }
    }

    mod form {
        use super::*;

        #[test]
        fn test_typing_and_advancing() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            answer(&mut app, "Alice");

            let form = app.form.as_ref().unwrap();
            assert_eq!(form.cursor(), 1);
            assert_eq!(form.answers().text(TextId::Name), Some("Alice"));
        }

        #[test]
        fn test_empty_answer_raises_notification() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.form.as_ref().unwrap().cursor(), 0);
            assert_eq!(app.state.current_error(), Some("Name is required"));
        }

        #[test]
        fn test_up_goes_back() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            answer(&mut app, "Alice");
            app.handle_key(key(KeyCode::Up)).unwrap();
            assert_eq!(app.form.as_ref().unwrap().cursor(), 0);
        }

        #[test]
        fn test_escape_abandons_form() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.form.is_none());
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[test]
        fn test_alt_enter_adds_newline_to_reason() {
            let mut app = app_with(MockAppendStore::new());
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            answer(&mut app, "Alice");
            answer(&mut app, "alice@olympus.gr");
            answer(&mut app, "Athens");
            answer(&mut app, "1234");
            type_text(&mut app, "One");
            app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT))
                .unwrap();
            type_text(&mut app, "Two");

            let form = app.form.as_ref().unwrap();
            assert_eq!(form.answers().text(TextId::Reason), Some("One\nTwo"));
            assert_eq!(form.cursor(), 4);
        }

        #[tokio::test(start_paused = true)]
        async fn test_key_during_reveal_skips_it() {
            let config = TuiConfig {
                skip_splash: Some(true),
                ..Default::default()
            };
            let mut app = App::with_store(config, Arc::new(MockAppendStore::new()));
            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            assert!(app.is_animating());

            app.handle_key(key(KeyCode::Char('A'))).unwrap();
            let form = app.form.as_ref().unwrap();
            assert!(form.reveal().is_complete());
            assert_eq!(form.answers().text(TextId::Name), Some(""));
        }

        #[tokio::test(start_paused = true)]
        async fn test_background_ticks_reveal_prompt() {
            let config = TuiConfig {
                skip_splash: Some(true),
                ..Default::default()
            };
            let mut app = App::with_store(config, Arc::new(MockAppendStore::new()));
            app.handle_key(key(KeyCode::Char('1'))).unwrap();

            tokio::time::sleep(Duration::from_millis(160)).await;
            app.poll_background();
            assert_eq!(app.form.as_ref().unwrap().reveal().revealed_text(), "Who");
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_successful_submission_shows_confirmation() {
            let mut store = MockAppendStore::new();
            store
                .expect_append()
                .withf(|path, record| {
                    path == "labyrinth_invites"
                        && record["name"] == "Alice"
                        && record["phoneLast4"] == "1234"
                        && record["acceptRules"] == true
                })
                .times(1)
                .returning(|_, _| Ok("-Npath".to_string()));
            let mut app = app_with(store);

            fill_trail(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.is_animating());
            wait_for_settle(&mut app).await;

            assert_eq!(app.state.current_view, View::Submitted(FormKind::Trail));
            assert_eq!(app.state.last_entry_id.as_deref(), Some("-Npath"));
            assert!(app.form.is_none());

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[tokio::test]
        async fn test_repeated_submit_appends_once() {
            let mut store = MockAppendStore::new();
            store
                .expect_append()
                .times(1)
                .returning(|_, _| Ok("-Nonce".to_string()));
            let mut app = app_with(store);

            fill_trail(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
                .unwrap();
            wait_for_settle(&mut app).await;

            assert_eq!(app.state.current_view, View::Submitted(FormKind::Trail));
        }

        #[tokio::test]
        async fn test_failed_submission_keeps_answers() {
            let mut store = MockAppendStore::new();
            store.expect_append().times(1).returning(|_, _| {
                Err(StoreError::Rejected {
                    status: 500,
                    body: "oracle offline".to_string(),
                })
            });
            let mut app = app_with(store);

            fill_trail(&mut app);
            let before = app.form.as_ref().unwrap().answers().clone();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            wait_for_settle(&mut app).await;

            let form = app.form.as_ref().unwrap();
            assert!(matches!(form.outcome(), SubmissionOutcome::Failed { .. }));
            assert_eq!(form.answers(), &before);
            assert_eq!(form.answers().ack(AckId::AcceptRules), Some(true));
            assert_eq!(app.state.current_view, View::Form(FormKind::Trail));
            assert_eq!(app.state.current_error(), Some(SUBMIT_FAILED_MESSAGE));
        }

        #[tokio::test]
        async fn test_unchecked_rules_never_reach_store() {
            let mut store = MockAppendStore::new();
            store.expect_append().times(0);
            let mut app = app_with(store);

            fill_trail(&mut app);
            // Untick the acknowledgment again
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.poll_background();

            assert!(app
                .state
                .current_error()
                .is_some_and(|e| e.starts_with(INCOMPLETE_MESSAGE)));
            assert_eq!(
                app.form.as_ref().unwrap().outcome(),
                &SubmissionOutcome::NotAttempted
            );
        }

        #[tokio::test]
        async fn test_ctrl_s_before_last_question_is_refused() {
            let mut store = MockAppendStore::new();
            store.expect_append().times(0);
            let mut app = app_with(store);

            app.handle_key(key(KeyCode::Char('1'))).unwrap();
            app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
                .unwrap();
            assert!(app.state.has_errors());
        }
    }
}
