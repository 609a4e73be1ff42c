//! Splash screen animation state

use std::time::{Duration, Instant};

/// Animation phase for splash screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    /// Logo and loading indicator
    Display,
    /// Logo fading into the landing menu
    FadeOut,
    /// Animation finished
    Complete,
}

/// Splash screen animation state
#[derive(Debug)]
pub struct SplashState {
    /// When the splash started
    pub start_time: Instant,
    /// Current animation phase
    pub phase: SplashPhase,
    /// Fade progress from 0.0 (fully visible) to 1.0 (gone)
    pub fade: f32,
    /// Number of loading dots to draw
    pub dots: usize,
}

impl SplashState {
    /// How long the Labyrinth loads before the menu appears (4 seconds)
    const DISPLAY_DURATION: Duration = Duration::from_millis(4000);
    /// Duration of the fade-out
    const FADE_DURATION: Duration = Duration::from_millis(1000);
    /// One loading dot is added per step
    const DOT_STEP: Duration = Duration::from_millis(400);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase: SplashPhase::Display,
            fade: 0.0,
            dots: 0,
        }
    }

    /// Update animation state based on elapsed time
    pub fn update(&mut self) {
        self.update_elapsed(self.start_time.elapsed());
    }

    fn update_elapsed(&mut self, elapsed: Duration) {
        if self.phase == SplashPhase::Complete {
            return;
        }

        self.dots = ((elapsed.as_millis() / Self::DOT_STEP.as_millis()) % 4) as usize;

        if elapsed < Self::DISPLAY_DURATION {
            self.phase = SplashPhase::Display;
            self.fade = 0.0;
        } else if elapsed < Self::DISPLAY_DURATION + Self::FADE_DURATION {
            self.phase = SplashPhase::FadeOut;
            let fade_elapsed = elapsed - Self::DISPLAY_DURATION;
            let progress = fade_elapsed.as_secs_f32() / Self::FADE_DURATION.as_secs_f32();
            self.fade = simple_easing::cubic_out(progress);
        } else {
            self.phase = SplashPhase::Complete;
            self.fade = 1.0;
        }
    }

    /// Skip to completion (user pressed a key)
    pub fn skip(&mut self) {
        self.phase = SplashPhase::Complete;
    }

    /// Check if animation is complete
    pub fn is_complete(&self) -> bool {
        self.phase == SplashPhase::Complete
    }
}

impl Default for SplashState {
    fn default() -> Self {
        Self::new()
    }
}
