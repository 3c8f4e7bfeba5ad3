//! Transcript storage and export.

use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// A chronological log of player turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get all entries.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that spent a question.
    pub fn numbered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.question_number.is_some())
            .count()
    }

    /// Export the transcript as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Twenty Questions\n\n");
        for entry in &self.entries {
            out.push_str(&format!("**{}**: {}\n", entry.label(), entry.user_text));
            out.push_str(&format!("  **Answer**: {}\n\n", entry.response_text));
        }
        out
    }

    /// Export the transcript as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Twenty Questions\n================\n\n");
        for entry in &self.entries {
            out.push_str(&format!("{}: {}\n", entry.label(), entry.user_text));
            out.push_str(&format!("  Answer: {}\n\n", entry.response_text));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::entry::{EntryId, EntryKind};
    use chrono::Utc;

    fn push(t: &mut Transcript, kind: EntryKind, text: &str, number: Option<u32>, correct: Option<bool>) {
        let id = EntryId(t.len() as u64 + 1);
        t.append(Entry {
            id,
            kind,
            user_text: text.to_string(),
            response_text: match correct {
                Some(true) => "Correct! You got it!".to_string(),
                Some(false) => "No, that's not correct.".to_string(),
                None => "Yes".to_string(),
            },
            question_number: number,
            is_correct: correct,
            timestamp: Utc::now(),
        });
    }

    #[test]
    fn empty_transcript() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert!(t.last().is_none());
    }

    #[test]
    fn numbered_count_skips_clarifications() {
        let mut t = Transcript::new();
        push(&mut t, EntryKind::Question, "Is it nice?", None, None);
        push(&mut t, EntryKind::Question, "Is it a fruit?", Some(1), None);
        push(&mut t, EntryKind::Guess, "pear", Some(2), Some(false));
        assert_eq!(t.len(), 3);
        assert_eq!(t.numbered_count(), 2);
        assert_eq!(t.last().map(|e| e.id), Some(EntryId(3)));
    }

    #[test]
    fn export_markdown_turns() {
        let mut t = Transcript::new();
        push(&mut t, EntryKind::Question, "Is it a fruit?", Some(1), None);
        push(&mut t, EntryKind::Guess, "apple", Some(2), Some(true));
        let md = t.export_markdown();
        assert!(md.starts_with("# Twenty Questions"));
        assert!(md.contains("**Q1**: Is it a fruit?"));
        assert!(md.contains("  **Answer**: Yes"));
        assert!(md.contains("**Q2 guess (correct)**: apple"));
    }

    #[test]
    fn export_text_clarification() {
        let mut t = Transcript::new();
        push(&mut t, EntryKind::Question, "Is it nice?", None, None);
        let txt = t.export_text();
        assert!(txt.contains("Clarification: Is it nice?"));
        assert!(txt.contains("  Answer: Yes"));
    }

    #[test]
    fn clear_empties() {
        let mut t = Transcript::new();
        push(&mut t, EntryKind::Question, "Is it big?", Some(1), None);
        t.clear();
        assert!(t.is_empty());
    }

    #[test]
    fn serializes_as_list() {
        let mut t = Transcript::new();
        push(&mut t, EntryKind::Question, "Is it big?", Some(1), None);
        let v = serde_json::to_value(&t).unwrap();
        assert!(v.is_array());
        assert_eq!(v[0]["userText"], "Is it big?");
    }
}
