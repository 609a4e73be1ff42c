//! Typed prompt reveal
//!
//! A question's prompt is revealed one character per tick before its input
//! accepts keys. [`RevealState`] is the pure text state; [`RevealTimer`] is
//! the repeating task that produces the ticks.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Progress of the reveal for the active prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    chars: Vec<char>,
    revealed: usize,
}

impl RevealState {
    /// Start revealing `prompt` from an empty string
    pub fn new(prompt: &str) -> Self {
        Self {
            chars: prompt.chars().collect(),
            revealed: 0,
        }
    }

    /// A state with the whole prompt already shown
    pub fn completed(prompt: &str) -> Self {
        let mut state = Self::new(prompt);
        state.finish();
        state
    }

    /// Start over with a new prompt
    pub fn restart(&mut self, prompt: &str) {
        *self = Self::new(prompt);
    }

    /// Reveal one more character. Returns true once the prompt is complete.
    pub fn tick(&mut self) -> bool {
        if self.revealed < self.chars.len() {
            self.revealed += 1;
        }
        self.is_complete()
    }

    /// Show the whole prompt at once
    pub fn finish(&mut self) {
        self.revealed = self.chars.len();
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.chars.len()
    }

    /// The part of the prompt shown so far
    pub fn revealed_text(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }
}

/// Tick emitted by a [`RevealTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTick {
    /// Generation of the timer run that produced this tick
    pub generation: u64,
}

/// Repeating reveal task with a single live handle.
///
/// `restart` aborts the running task before spawning the next one and bumps
/// the generation, so ticks already queued by the aborted run are ignored by
/// [`RevealTimer::accepts`].
#[derive(Debug)]
pub struct RevealTimer {
    interval: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
    tx: UnboundedSender<RevealTick>,
}

impl RevealTimer {
    pub fn new(interval: Duration, tx: UnboundedSender<RevealTick>) -> Self {
        Self {
            interval,
            generation: 0,
            handle: None,
            tx,
        }
    }

    /// Cancel any running reveal and start a new one
    pub fn restart(&mut self) {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let interval = self.interval;
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            loop {
                ticker.tick().await;
                if tx.send(RevealTick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop the running reveal, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a tick belongs to the current run
    pub fn accepts(&self, tick: RevealTick) -> bool {
        self.handle.is_some() && tick.generation == self.generation
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    mod reveal_state {
        use super::*;

        #[test]
        fn test_starts_empty() {
            let state = RevealState::new("Who goes there?");
            assert_eq!(state.revealed_text(), "");
            assert!(!state.is_complete());
        }

        #[test]
        fn test_tick_reveals_one_char() {
            let mut state = RevealState::new("Minos");
            assert!(!state.tick());
            assert!(!state.tick());
            assert_eq!(state.revealed_text(), "Mi");
        }

        #[test]
        fn test_tick_completes_and_saturates() {
            let mut state = RevealState::new("Ox");
            state.tick();
            assert!(state.tick());
            assert!(state.tick());
            assert_eq!(state.revealed_text(), "Ox");
        }

        #[test]
        fn test_handles_multibyte_chars() {
            let mut state = RevealState::new("Ωμέγα");
            state.tick();
            state.tick();
            assert_eq!(state.revealed_text(), "Ωμ");
        }

        #[test]
        fn test_restart_begins_from_empty() {
            let mut state = RevealState::new("First prompt");
            state.finish();
            state.restart("Second");
            assert_eq!(state.revealed_text(), "");
            assert!(!state.is_complete());
        }

        #[test]
        fn test_empty_prompt_is_complete() {
            assert!(RevealState::new("").is_complete());
        }

        #[test]
        fn test_completed_shows_everything() {
            let state = RevealState::completed("Daedalus");
            assert!(state.is_complete());
            assert_eq!(state.revealed_text(), "Daedalus");
        }
    }

    mod reveal_timer {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_emits_ticks_at_interval() {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let mut timer = RevealTimer::new(Duration::from_millis(50), tx);
            timer.restart();

            tokio::time::sleep(Duration::from_millis(160)).await;

            let mut ticks = Vec::new();
            while let Ok(tick) = rx.try_recv() {
                ticks.push(tick);
            }
            assert_eq!(ticks.len(), 3);
            assert!(ticks.iter().all(|t| timer.accepts(*t)));
        }

        #[tokio::test(start_paused = true)]
        async fn test_restart_invalidates_previous_run() {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let mut timer = RevealTimer::new(Duration::from_millis(50), tx);
            timer.restart();
            tokio::time::sleep(Duration::from_millis(60)).await;
            let stale = rx.recv().await.unwrap();

            timer.restart();
            assert!(!timer.accepts(stale));
            assert_eq!(timer.generation(), 2);

            tokio::time::sleep(Duration::from_millis(60)).await;
            let fresh = rx.recv().await.unwrap();
            assert!(timer.accepts(fresh));
        }

        #[tokio::test(start_paused = true)]
        async fn test_cancel_stops_ticks() {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let mut timer = RevealTimer::new(Duration::from_millis(50), tx);
            timer.restart();
            timer.cancel();

            tokio::time::sleep(Duration::from_millis(200)).await;
            assert!(rx.try_recv().is_err());
        }

        #[tokio::test(start_paused = true)]
        async fn test_cancelled_timer_accepts_nothing() {
            let (tx, _rx) = mpsc::unbounded_channel();
            let mut timer = RevealTimer::new(Duration::from_millis(50), tx);
            timer.restart();
            let generation = timer.generation();
            timer.cancel();
            assert!(!timer.accepts(RevealTick { generation }));
        }
    }
}
