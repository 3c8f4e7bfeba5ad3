//! An oracle that replays queued answers.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{OracleError, OracleResult};
use crate::oracle::Oracle;
use crate::verdict::{Evaluation, Verdict};

/// A call received by a [`ScriptedOracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedCall {
    /// `select_secret_item` was called.
    SelectSecretItem,
    /// `evaluate` was called with these arguments.
    Evaluate {
        /// The secret item passed in.
        secret_item: String,
        /// The player text passed in.
        user_text: String,
        /// The question index passed in.
        question_index: u32,
    },
}

#[derive(Debug, Default)]
struct Script {
    items: VecDeque<OracleResult<String>>,
    evaluations: VecDeque<OracleResult<Evaluation>>,
    calls: Vec<ScriptedCall>,
}

/// An in-memory [`Oracle`] that answers from a queue.
///
/// Item selections and evaluations are queued separately and consumed in
/// order. An empty queue answers with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    script: Mutex<Script>,
    delay: Option<Duration>,
}

impl ScriptedOracle {
    /// Create an oracle with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait `delay` before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a secret item.
    pub fn item(self, item: impl Into<String>) -> Self {
        self.lock().items.push_back(Ok(item.into()));
        self
    }

    /// Queue a failed item selection.
    pub fn item_error(self, err: OracleError) -> Self {
        self.lock().items.push_back(Err(err));
        self
    }

    /// Queue a verdict with its default response text.
    pub fn verdict(self, verdict: Verdict) -> Self {
        self.evaluation(Evaluation::bare(verdict))
    }

    /// Queue a full evaluation.
    pub fn evaluation(self, evaluation: Evaluation) -> Self {
        self.lock().evaluations.push_back(Ok(evaluation));
        self
    }

    /// Queue a failed evaluation.
    pub fn evaluation_error(self, err: OracleError) -> Self {
        self.lock().evaluations.push_back(Err(err));
        self
    }

    /// Queue more verdicts on an oracle that is already shared.
    pub fn push_verdict(&self, verdict: Verdict) {
        self.lock()
            .evaluations
            .push_back(Ok(Evaluation::bare(verdict)));
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.lock().calls.clone()
    }

    /// Number of queued answers not yet consumed.
    pub fn remaining(&self) -> usize {
        let script = self.lock();
        script.items.len() + script.evaluations.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn exhausted() -> OracleError {
    OracleError::Transport("scripted oracle has no answer queued".to_string())
}

impl Oracle for ScriptedOracle {
    async fn select_secret_item(&self) -> OracleResult<String> {
        let next = {
            let mut script = self.lock();
            script.calls.push(ScriptedCall::SelectSecretItem);
            script.items.pop_front()
        };
        self.pause().await;
        next.unwrap_or_else(|| Err(exhausted()))
    }

    async fn evaluate(
        &self,
        secret_item: &str,
        user_text: &str,
        question_index: u32,
    ) -> OracleResult<Evaluation> {
        let next = {
            let mut script = self.lock();
            script.calls.push(ScriptedCall::Evaluate {
                secret_item: secret_item.to_string(),
                user_text: user_text.to_string(),
                question_index,
            });
            script.evaluations.pop_front()
        };
        self.pause().await;
        next.unwrap_or_else(|| Err(exhausted()))
    }
}
