//! Oracle client for Twenty Questions.
//!
//! The oracle is the remote judge that picks the secret item and classifies
//! every player input into a closed [`Verdict`]. This crate defines the
//! [`Oracle`] trait the game engine drives, the JSON wire protocol, an HTTP
//! transport, and a scripted oracle for tests.

pub mod error;
pub mod http;
pub mod oracle;
pub mod scripted;
pub mod verdict;
pub mod wire;

pub use error::{OracleError, OracleResult};
pub use http::HttpOracle;
pub use oracle::{DEFAULT_TIMEOUT, Oracle};
pub use scripted::ScriptedOracle;
pub use verdict::{Answer, Evaluation, Verdict};
