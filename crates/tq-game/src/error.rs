//! Error types for the game engine.

use thiserror::Error;

use tq_oracle::OracleError;

use crate::phase::Phase;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while playing.
#[derive(Debug, Error)]
pub enum GameError {
    /// The oracle could not answer; the attempted operation was rolled back.
    #[error(transparent)]
    OracleUnavailable(#[from] OracleError),
}

/// Why a session refused an operation.
///
/// Refusals are not errors: the caller is expected to drop the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidTransition {
    /// The operation needs a game in progress.
    #[error("no game in progress (phase: {0})")]
    NotPlaying(Phase),

    /// An oracle call is already outstanding.
    #[error("waiting for the oracle")]
    Pending,

    /// Every question has been spent.
    #[error("no questions left")]
    BudgetExhausted,

    /// A new game can only start once the current one is over.
    #[error("a game is already running (phase: {0})")]
    AlreadyRunning(Phase),
}
