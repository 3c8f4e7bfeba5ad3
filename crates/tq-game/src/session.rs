//! Game session state machine.
//!
//! `GameSession` owns everything a game knows: phase, secret item, question
//! budget, transcript and the single-flight `pending` flag. It never calls the
//! oracle itself. Each oracle-backed operation is split in two:
//!
//! - `begin_*` validates the transition, raises `pending` and returns a ticket
//!   describing the oracle call to make;
//! - `finish_*` takes the ticket back together with the oracle's result and
//!   applies it.
//!
//! Tickets remember the session epoch. `reset`, `give_up` and starting a new
//! game bump the epoch, so a result that arrives for a superseded ticket is
//! dropped without touching the session.

use chrono::Utc;
use serde::Serialize;

use tq_oracle::{Evaluation, OracleError, OracleResult, Verdict};

use crate::config::GameConfig;
use crate::error::{GameResult, InvalidTransition};
use crate::phase::Phase;
use crate::transcript::{Entry, EntryId, EntryKind, Transcript};

const GIVE_UP_TEXT: &str = "I give up. What was the answer?";

/// Proof that a new game was requested; redeem with
/// [`GameSession::finish_new_game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTicket {
    epoch: u64,
}

/// A submitted turn waiting for its verdict; redeem with
/// [`GameSession::finish_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnTicket {
    epoch: u64,
    user_text: String,
    secret_item: String,
    question_index: u32,
}

impl TurnTicket {
    /// The player's text, as submitted.
    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    /// The secret item the oracle should judge against.
    pub fn secret_item(&self) -> &str {
        &self.secret_item
    }

    /// Questions used before this turn.
    pub fn question_index(&self) -> u32 {
        self.question_index
    }
}

/// Read-only snapshot of a session for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Current phase.
    pub phase: Phase,
    /// Questions spent so far.
    pub questions_used: u32,
    /// Question budget.
    pub max_questions: u32,
    /// Every recorded turn.
    pub transcript: Transcript,
    /// Whether an oracle call is outstanding.
    pub pending: bool,
    /// The secret item, once chosen.
    pub secret_item: Option<String>,
}

/// An interactive Twenty Questions session.
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: Phase,
    secret_item: Option<String>,
    questions_used: u32,
    max_questions: u32,
    transcript: Transcript,
    pending: bool,
    next_id: u64,
    epoch: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameSession {
    /// Create a session at [`Phase::Intro`].
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: Phase::Intro,
            secret_item: None,
            questions_used: 0,
            max_questions: config.max_questions.max(1),
            transcript: Transcript::new(),
            pending: false,
            next_id: 1,
            epoch: 0,
        }
    }

    /// Get the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the secret item, once chosen.
    pub fn secret_item(&self) -> Option<&str> {
        self.secret_item.as_deref()
    }

    /// Questions spent so far.
    pub fn questions_used(&self) -> u32 {
        self.questions_used
    }

    /// The question budget.
    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    /// Questions still available.
    pub fn questions_remaining(&self) -> u32 {
        self.max_questions - self.questions_used
    }

    /// Get the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether an oracle call is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Snapshot the session for display.
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            questions_used: self.questions_used,
            max_questions: self.max_questions,
            transcript: self.transcript.clone(),
            pending: self.pending,
            secret_item: self.secret_item.clone(),
        }
    }

    /// Like [`view`](Self::view), but the secret item is only revealed once
    /// the game is over.
    pub fn public_view(&self) -> SessionView {
        let mut view = self.view();
        if !self.phase.is_terminal() {
            view.secret_item = None;
        }
        view
    }

    /// Request a new game. Allowed from intro, won or lost.
    ///
    /// Discards the previous game and moves to [`Phase::AwaitingItem`].
    pub fn begin_new_game(&mut self) -> Result<ItemTicket, InvalidTransition> {
        if self.pending {
            return Err(InvalidTransition::Pending);
        }
        if !self.phase.can_start() {
            return Err(InvalidTransition::AlreadyRunning(self.phase));
        }

        self.clear_game();
        self.phase = Phase::AwaitingItem;
        self.pending = true;
        tracing::info!(phase = %self.phase, "new game requested");
        Ok(ItemTicket { epoch: self.epoch })
    }

    /// Apply the oracle's item selection.
    ///
    /// Returns `Ok(true)` once playing, `Ok(false)` if the ticket was
    /// superseded, and the oracle error (after falling back to intro) if
    /// selection failed.
    pub fn finish_new_game(
        &mut self,
        ticket: ItemTicket,
        result: OracleResult<String>,
    ) -> GameResult<bool> {
        if ticket.epoch != self.epoch || self.phase != Phase::AwaitingItem {
            tracing::debug!(phase = %self.phase, "dropping superseded item selection");
            return Ok(false);
        }
        self.pending = false;

        let item = result.and_then(|item| {
            let item = item.trim().to_lowercase();
            if item.is_empty() {
                Err(OracleError::Malformed("empty secret item".to_string()))
            } else {
                Ok(item)
            }
        });

        match item {
            Ok(item) => {
                self.secret_item = Some(item);
                self.phase = Phase::Playing;
                tracing::info!(phase = %self.phase, max_questions = self.max_questions, "game started");
                Ok(true)
            }
            Err(e) => {
                self.phase = Phase::Intro;
                tracing::warn!(%e, "could not start game");
                Err(e.into())
            }
        }
    }

    /// Submit a question or guess.
    ///
    /// Refused unless playing, idle, and with questions left.
    pub fn begin_submit(&mut self, user_text: &str) -> Result<TurnTicket, InvalidTransition> {
        if self.phase != Phase::Playing {
            return Err(InvalidTransition::NotPlaying(self.phase));
        }
        if self.pending {
            return Err(InvalidTransition::Pending);
        }
        if self.questions_used >= self.max_questions {
            return Err(InvalidTransition::BudgetExhausted);
        }
        let Some(secret_item) = self.secret_item.clone() else {
            return Err(InvalidTransition::NotPlaying(self.phase));
        };

        self.pending = true;
        Ok(TurnTicket {
            epoch: self.epoch,
            user_text: user_text.to_string(),
            secret_item,
            question_index: self.questions_used,
        })
    }

    /// Apply the oracle's verdict for a submitted turn.
    ///
    /// Returns the recorded entry, `None` if the ticket was superseded, or the
    /// oracle error. A failed call records nothing and spends no question.
    pub fn finish_submit(
        &mut self,
        ticket: TurnTicket,
        result: OracleResult<Evaluation>,
    ) -> GameResult<Option<Entry>> {
        if ticket.epoch != self.epoch || !self.pending || self.phase != Phase::Playing {
            tracing::debug!(phase = %self.phase, "dropping superseded verdict");
            return Ok(None);
        }
        self.pending = false;

        let evaluation = result.inspect_err(|e| tracing::warn!(%e, "turn discarded"))?;
        Ok(Some(self.apply(ticket.user_text, evaluation)))
    }

    /// Forfeit the game, revealing the secret item. Spends one question.
    pub fn give_up(&mut self) -> Result<Entry, InvalidTransition> {
        if self.phase != Phase::Playing {
            return Err(InvalidTransition::NotPlaying(self.phase));
        }
        let item = self.secret_item.clone().unwrap_or_default();

        self.pending = false;
        self.epoch += 1;
        self.questions_used += 1;
        self.phase = Phase::Lost;
        let entry = self.record(
            EntryKind::Question,
            GIVE_UP_TEXT.to_string(),
            format!("The answer was \"{item}\". Better luck next time!"),
            Some(self.questions_used),
            None,
        );
        tracing::info!(phase = %self.phase, questions_used = self.questions_used, "player gave up");
        Ok(entry)
    }

    /// Return to intro, discarding everything.
    pub fn reset(&mut self) {
        self.clear_game();
        self.phase = Phase::Intro;
        tracing::debug!("session reset");
    }

    fn clear_game(&mut self) {
        self.secret_item = None;
        self.questions_used = 0;
        self.transcript.clear();
        self.pending = false;
        self.next_id = 1;
        self.epoch += 1;
    }

    fn apply(&mut self, user_text: String, evaluation: Evaluation) -> Entry {
        let Evaluation { verdict, content } = evaluation;

        let kind = match verdict {
            Verdict::NeedsClarification => {
                tracing::debug!("clarification requested");
                return self.record(EntryKind::Question, user_text, content, None, None);
            }
            Verdict::Win | Verdict::WrongGuess => EntryKind::Guess,
            Verdict::PlainAnswer(_) => EntryKind::Question,
        };

        let number = self.questions_used + 1;
        self.questions_used = number;
        let is_correct = (kind == EntryKind::Guess).then_some(verdict == Verdict::Win);

        if verdict == Verdict::Win {
            self.phase = Phase::Won;
        } else if number >= self.max_questions {
            self.phase = Phase::Lost;
        }
        if self.phase.is_terminal() {
            tracing::info!(phase = %self.phase, questions_used = number, "game over");
        }
        self.record(kind, user_text, content, Some(number), is_correct)
    }

    fn record(
        &mut self,
        kind: EntryKind,
        user_text: String,
        response_text: String,
        question_number: Option<u32>,
        is_correct: Option<bool>,
    ) -> Entry {
        let entry = Entry {
            id: EntryId(self.next_id),
            kind,
            user_text,
            response_text,
            question_number,
            is_correct,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.transcript.append(entry.clone());
        entry
    }
}
