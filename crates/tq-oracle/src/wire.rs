//! JSON wire protocol spoken with the oracle endpoint.
//!
//! Requests are tagged by `action`. Item selection answers with
//! `{"content": "..."}`; evaluation answers with
//! `{"type": "answer" | "clarification" | "guess_evaluation", "content": "...", "isCorrect": bool}`.
//! Decoding is strict: anything outside these shapes is an error.

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};
use crate::verdict::{Answer, Evaluation, Verdict};

/// A request body sent to the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OracleRequest {
    /// Ask the oracle to choose a new secret item.
    SelectSecretItem,
    /// Ask the oracle to judge one player input.
    #[serde(rename_all = "camelCase")]
    EvaluateInput {
        /// The player's raw text.
        user_input: String,
        /// Questions already used before this input.
        question_count: u32,
        /// The item the oracle is judging against.
        secret_item: String,
    },
}

impl OracleRequest {
    /// The `action` tag of this request.
    pub fn action(&self) -> &'static str {
        match self {
            Self::SelectSecretItem => "select_secret_item",
            Self::EvaluateInput { .. } => "evaluate_input",
        }
    }
}

/// Response body for [`OracleRequest::SelectSecretItem`].
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSelectionBody {
    /// The chosen item.
    pub content: String,
}

/// Evaluation response kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// A yes/no answer to a question.
    Answer,
    /// The input could not be judged.
    Clarification,
    /// The input was judged as a guess.
    GuessEvaluation,
}

impl ResponseType {
    /// Parse the `type` field of an evaluation body.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "answer" => Some(Self::Answer),
            "clarification" => Some(Self::Clarification),
            "guess_evaluation" => Some(Self::GuessEvaluation),
            _ => None,
        }
    }
}

/// Response body for [`OracleRequest::EvaluateInput`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationBody {
    /// Response kind. Kept as a raw string so unknown kinds can be reported.
    #[serde(rename = "type")]
    pub kind: String,
    /// Text for the player.
    pub content: String,
    /// Guess correctness; only meaningful for `guess_evaluation`.
    #[serde(default)]
    pub is_correct: Option<bool>,
}

/// Decode an item selection body into a normalized item name.
pub fn decode_item(bytes: &[u8]) -> OracleResult<String> {
    let body: ItemSelectionBody =
        serde_json::from_slice(bytes).map_err(|e| OracleError::Malformed(e.to_string()))?;
    let item = body.content.trim().to_lowercase();
    if item.is_empty() {
        return Err(OracleError::Malformed("empty secret item".to_string()));
    }
    Ok(item)
}

/// Decode an evaluation body into an [`Evaluation`].
pub fn decode_evaluation(bytes: &[u8]) -> OracleResult<Evaluation> {
    let body: EvaluationBody =
        serde_json::from_slice(bytes).map_err(|e| OracleError::Malformed(e.to_string()))?;
    evaluation_from_body(body)
}

/// Map a parsed evaluation body onto the closed verdict set.
pub fn evaluation_from_body(body: EvaluationBody) -> OracleResult<Evaluation> {
    let kind =
        ResponseType::parse(&body.kind).ok_or_else(|| OracleError::UnknownVerdict(body.kind.clone()))?;

    let verdict = match kind {
        ResponseType::Answer => {
            let answer = Answer::parse(&body.content)
                .ok_or_else(|| OracleError::UnknownVerdict(body.content.clone()))?;
            Verdict::PlainAnswer(answer)
        }
        ResponseType::Clarification => Verdict::NeedsClarification,
        ResponseType::GuessEvaluation => match body.is_correct {
            Some(true) => Verdict::Win,
            Some(false) => Verdict::WrongGuess,
            None => {
                return Err(OracleError::Malformed(
                    "guess_evaluation without isCorrect".to_string(),
                ));
            }
        },
    };

    Ok(Evaluation::new(verdict, body.content))
}
