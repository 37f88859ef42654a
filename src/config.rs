//! Runtime settings for a quiz session.

use std::path::PathBuf;
use std::time::Duration;

use crate::ranking::MAX_RANKINGS;

/// Timer settings driving automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Period of the question clock.
    pub tick_interval: Duration,
    /// Pause between an answer and the next question.
    pub advance_delay: Duration,
    /// Steps shown on the category transition screen before moving on.
    pub countdown_steps: u32,
    pub countdown_step: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            advance_delay: Duration::from_millis(1500),
            countdown_steps: 3,
            countdown_step: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub timers: TimerConfig,
    /// JSON question bank, or the built-in one when `None`.
    pub questions_path: Option<PathBuf>,
    /// Leaderboard file, or memory only when `None`.
    pub rankings_path: Option<PathBuf>,
    pub max_rankings: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            timers: TimerConfig::default(),
            questions_path: None,
            rankings_path: None,
            max_rankings: MAX_RANKINGS,
        }
    }
}
