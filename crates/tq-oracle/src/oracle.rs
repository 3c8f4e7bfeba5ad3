//! The oracle seam the game engine is written against.

use std::future::Future;
use std::time::Duration;

use crate::error::OracleResult;
use crate::verdict::Evaluation;

/// Default upper bound for a single oracle call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A remote judge for Twenty Questions.
///
/// Implementations must map whatever their backend returns onto the closed
/// [`Verdict`](crate::Verdict) set and report anything else as an error.
pub trait Oracle {
    /// Choose a fresh secret item: a concrete, common, physical noun.
    fn select_secret_item(&self) -> impl Future<Output = OracleResult<String>> + Send;

    /// Judge `user_text` against `secret_item`.
    ///
    /// `question_index` is the number of questions already used.
    fn evaluate(
        &self,
        secret_item: &str,
        user_text: &str,
        question_index: u32,
    ) -> impl Future<Output = OracleResult<Evaluation>> + Send;
}
