//! Async driver tying a [`GameSession`] to an [`Oracle`].

use std::future::Future;
use std::time::Duration;

use tq_oracle::{Oracle, OracleError, OracleResult};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::session::GameSession;
use crate::transcript::Entry;

/// A playable game: one session plus the oracle that judges it.
///
/// Refused operations (see [`InvalidTransition`](crate::InvalidTransition))
/// are silent no-ops here. Every oracle call is bounded by the configured
/// timeout.
#[derive(Debug)]
pub struct Game<O> {
    session: GameSession,
    oracle: O,
    timeout: Duration,
}

impl<O: Oracle> Game<O> {
    /// Create a game at intro.
    pub fn new(oracle: O, config: GameConfig) -> Self {
        Self {
            session: GameSession::new(&config),
            oracle,
            timeout: config.oracle_timeout,
        }
    }

    /// Get the session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Get the oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Start a new game with a freshly chosen secret item.
    ///
    /// Returns `Ok(false)` if a game is already running.
    pub async fn start_new_game(&mut self) -> GameResult<bool> {
        let ticket = match self.session.begin_new_game() {
            Ok(ticket) => ticket,
            Err(reason) => {
                tracing::debug!(%reason, "new game ignored");
                return Ok(false);
            }
        };
        let result = bounded(self.timeout, self.oracle.select_secret_item()).await;
        self.session.finish_new_game(ticket, result)
    }

    /// Submit a question or guess and record the oracle's verdict.
    ///
    /// Returns `Ok(None)` if the submission was ignored.
    pub async fn submit(&mut self, user_text: &str) -> GameResult<Option<Entry>> {
        let ticket = match self.session.begin_submit(user_text) {
            Ok(ticket) => ticket,
            Err(reason) => {
                tracing::debug!(%reason, "submission ignored");
                return Ok(None);
            }
        };
        let result = bounded(
            self.timeout,
            self.oracle.evaluate(
                ticket.secret_item(),
                ticket.user_text(),
                ticket.question_index(),
            ),
        )
        .await;
        self.session.finish_submit(ticket, result)
    }

    /// Forfeit the current game. Returns `None` if no game is running.
    pub fn give_up(&mut self) -> Option<Entry> {
        self.session
            .give_up()
            .inspect_err(|reason| tracing::debug!(%reason, "give up ignored"))
            .ok()
    }

    /// Return to intro, discarding everything.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = OracleResult<T>>,
) -> OracleResult<T> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(OracleError::Timeout(limit)))
}
