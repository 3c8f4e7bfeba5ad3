//! Error types for oracle calls.
//!
//! Every variant means the oracle is unavailable for this call; callers roll
//! back whatever operation was waiting on it.

use std::time::Duration;

use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while talking to the oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The request could not be sent or the response could not be read.
    #[error("oracle unavailable: {0}")]
    Transport(String),

    /// The oracle did not answer in time.
    #[error("oracle unavailable: no answer within {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The oracle answered with a non-success HTTP status.
    #[error("oracle unavailable: HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The (possibly truncated) response body.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("oracle unavailable: malformed response: {0}")]
    Malformed(String),

    /// The response named a verdict outside the closed vocabulary.
    #[error("oracle unavailable: unknown verdict '{0}'")]
    UnknownVerdict(String),

    /// The configured endpoint is not a usable URL.
    #[error("invalid oracle endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint as given.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_share_unavailable_prefix() {
        let errors = [
            OracleError::Transport("connection refused".to_string()),
            OracleError::Timeout(Duration::from_secs(5)),
            OracleError::Status {
                status: 500,
                body: "boom".to_string(),
            },
            OracleError::Malformed("missing field `content`".to_string()),
            OracleError::UnknownVerdict("maybe".to_string()),
        ];
        for err in errors {
            assert!(err.to_string().starts_with("oracle unavailable"));
        }
    }

    #[test]
    fn timeout_message_in_millis() {
        let err = OracleError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "oracle unavailable: no answer within 5000ms");
    }
}
