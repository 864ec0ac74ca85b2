//! Constraint solving
//!
//! Accumulates feedback into a constraint model, filters the word pool
//! against it, ranks the survivors and drives a game round by round.

mod constraints;
pub mod filter;
pub mod ranker;
mod session;

pub use constraints::{ConstraintModel, ConstraintSummary};
pub use session::{GuessRecord, GuessSource, NextGuess, SessionState, SolverSession, Suggestion};
