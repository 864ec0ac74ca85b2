//! Error types for the solving engine

use super::WordError;
use crate::solver::SessionState;

/// Errors surfaced by feedback handling, constraint updates and sessions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// Guess/target or guess/feedback lengths disagree
    #[error("length mismatch: expected {expected} letters, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Feedback contradicts what earlier rounds established
    #[error("feedback conflicts with earlier rounds: {0}")]
    Conflict(#[from] Conflict),

    /// Round input could not be normalized to one status per letter
    #[error("malformed feedback: {0}")]
    MalformedFeedback(String),

    #[error("invalid word: {0}")]
    InvalidWord(#[from] WordError),

    /// The session already reached a terminal state
    #[error("session is {state}; no further rounds are accepted")]
    SessionFinished { state: SessionState },
}

/// The specific contradiction behind a rejected update
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Conflict {
    #[error("position {position} is fixed to '{fixed}', feedback says '{reported}'")]
    FixedMismatch {
        position: usize,
        fixed: char,
        reported: char,
    },

    #[error("'{letter}' cannot be both correct and excluded at position {position}")]
    ExcludedAtFixed { position: usize, letter: char },

    #[error("'{letter}' needs at least {min} occurrences but at most {max} are allowed")]
    CountRange { letter: char, min: usize, max: usize },

    #[error("{required} letters are required but words only have {word_length}")]
    TooManyLetters { required: usize, word_length: usize },
}
