//! Core domain types
//!
//! Words, per-letter feedback and the ground-truth feedback generator. These
//! are pure values with no I/O; everything else in the crate builds on them.

mod error;
mod feedback;
mod input;
mod status;
mod word;

pub use error::{Conflict, SolverError};
pub use feedback::generate;
pub use input::FeedbackInput;
pub use status::{LetterStatus, is_solved, parse_statuses, to_emoji, to_symbols};
pub use word::{Word, WordError};
