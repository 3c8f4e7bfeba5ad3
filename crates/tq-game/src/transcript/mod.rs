//! Transcript of a game: every player turn and how it was resolved.

pub mod entry;
pub mod log;

pub use entry::{Entry, EntryId, EntryKind};
pub use log::Transcript;
