//! Transcript entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a transcript entry, unique within a session and increasing
/// in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of turn an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A yes/no question, a clarification, or a forfeit.
    Question,
    /// An attempt to name the secret item.
    Guess,
}

/// One player turn and its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique id in generation order.
    pub id: EntryId,
    /// Question or guess.
    pub kind: EntryKind,
    /// What the player typed.
    pub user_text: String,
    /// What the oracle (or the game) answered.
    pub response_text: String,
    /// Budget position of this turn; `None` for clarifications, which are free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u32>,
    /// Whether a guess was right; `None` for questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    /// Whether this turn was a free clarification.
    pub fn is_clarification(&self) -> bool {
        self.question_number.is_none()
    }

    /// Short heading for exports, e.g. `Q3`, `Q4 guess (wrong)` or `Clarification`.
    pub fn label(&self) -> String {
        match (self.question_number, self.kind, self.is_correct) {
            (None, _, _) => "Clarification".to_string(),
            (Some(n), EntryKind::Guess, Some(true)) => format!("Q{n} guess (correct)"),
            (Some(n), EntryKind::Guess, _) => format!("Q{n} guess (wrong)"),
            (Some(n), EntryKind::Question, _) => format!("Q{n}"),
        }
    }
}
