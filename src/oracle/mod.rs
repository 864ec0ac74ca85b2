//! External suggestion oracle
//!
//! An oracle sees the ranked candidates, the constraint summary and the
//! history, and may propose a different next guess. It is optional: every
//! failure means "no oracle this round" and the session falls back to the
//! top-ranked candidate.

pub mod chat;

pub use chat::ChatOracle;

use crate::solver::{ConstraintSummary, GuessRecord};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Language of the game, passed through to the oracle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// English name, used in prompts
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything an oracle gets to see for one round
#[derive(Debug, Clone, Serialize)]
pub struct OracleRequest<'a> {
    /// Top ranked candidates, best first
    pub candidates: &'a [String],
    pub constraints: &'a ConstraintSummary,
    pub history: &'a [GuessRecord],
    pub language: Language,
    pub word_length: usize,
    /// The session stops waiting for an answer after this
    #[serde(skip)]
    pub timeout: Duration,
}

/// A proposed guess with the oracle's reasoning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleSuggestion {
    pub word: String,
    pub explanation: String,
}

/// Why the oracle produced nothing usable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("no oracle configured")]
    Unavailable,

    #[error("oracle did not answer within {0:?}")]
    Timeout(Duration),

    #[error("oracle transport error: {0}")]
    Transport(String),

    #[error("oracle returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),
}

/// A source of next-guess suggestions
///
/// Implementations must be shareable across threads; sessions hold them
/// behind an `Arc`.
pub trait Oracle: Send + Sync {
    /// Propose the next guess
    ///
    /// # Errors
    /// Any `OracleError`; callers treat all of them as "no suggestion".
    fn suggest(&self, request: &OracleRequest<'_>) -> Result<OracleSuggestion, OracleError>;

    /// False for oracles that never suggest, so sessions can skip the call
    fn is_enabled(&self) -> bool {
        true
    }
}

/// The default oracle: never suggests anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOracle;

impl Oracle for NoOracle {
    fn suggest(&self, _request: &OracleRequest<'_>) -> Result<OracleSuggestion, OracleError> {
        Err(OracleError::Unavailable)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
