//! Game state machine for Twenty Questions.
//!
//! [`GameSession`] is a synchronous reducer over phase, question budget and
//! transcript. Oracle-backed operations are split into a `begin_*` half that
//! validates the transition and a `finish_*` half that applies the oracle's
//! answer. [`Game`] drives a session against any [`tq_oracle::Oracle`].

pub mod config;
pub mod error;
pub mod game;
pub mod phase;
pub mod session;
pub mod transcript;

pub use config::GameConfig;
pub use error::{GameError, GameResult, InvalidTransition};
pub use game::Game;
pub use phase::Phase;
pub use session::{GameSession, ItemTicket, SessionView, TurnTicket};
pub use transcript::{Entry, EntryId, EntryKind, Transcript};
