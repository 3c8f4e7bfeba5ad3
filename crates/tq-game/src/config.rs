//! Configuration for a game session.

use std::time::Duration;

use tq_oracle::DEFAULT_TIMEOUT;

/// Default question budget.
pub const DEFAULT_MAX_QUESTIONS: u32 = 20;

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Questions the player may spend before losing (at least 1).
    pub max_questions: u32,
    /// Upper bound for a single oracle call.
    pub oracle_timeout: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            oracle_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GameConfig {
    /// Set the question budget (at least 1).
    pub fn with_max_questions(mut self, max_questions: u32) -> Self {
        self.max_questions = max_questions.max(1);
        self
    }

    /// Set the oracle timeout.
    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout;
        self
    }
}
