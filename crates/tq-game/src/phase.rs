//! Game phases.

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// No game; waiting for the player to start one.
    #[default]
    Intro,
    /// Waiting for the oracle to choose a secret item.
    AwaitingItem,
    /// A game is in progress.
    Playing,
    /// The player named the secret item.
    Won,
    /// The budget ran out or the player gave up.
    Lost,
}

impl Phase {
    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Whether a new game may be started from this phase.
    pub fn can_start(self) -> bool {
        matches!(self, Self::Intro | Self::Won | Self::Lost)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intro => write!(f, "intro"),
            Self::AwaitingItem => write!(f, "awaiting-item"),
            Self::Playing => write!(f, "playing"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}
