//! Word solving command
//!
//! Plays a full game against a known target, using the feedback generator
//! as the opponent, and returns the solution path.

use crate::core::{LetterStatus, Word, generate, is_solved};
use crate::solver::{GuessSource, NextGuess, SolverSession};
use anyhow::{Context, Result};
use tracing::warn;

/// Configuration for solving a word
pub struct SolveConfig {
    pub target: String,
    pub max_guesses: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: String) -> Self {
        Self {
            target,
            max_guesses: 6,
        }
    }
}

/// Result of solving a word
pub struct SolveResult {
    pub success: bool,
    /// Candidates ran out before the target was found
    pub exhausted: bool,
    pub guesses: Vec<GuessStep>,
    pub target: String,
}

/// A single guess step in the solution
pub struct GuessStep {
    pub word: String,
    pub feedback: Vec<LetterStatus>,
    pub candidates_before: usize,
    pub candidates_after: usize,
    pub source: GuessSource,
}

/// Solve a specific word with a fresh session
///
/// # Errors
///
/// Returns an error if:
/// - The target is not a word of the pool's length
/// - The oracle suggests something that is not a word of that length
/// - The session rejects a round (which would mean the filter is unsound)
pub fn solve_word(config: SolveConfig, mut session: SolverSession) -> Result<SolveResult> {
    let word_length = session.pool().word_length();
    let target = Word::with_length(config.target.as_str(), word_length)
        .with_context(|| format!("invalid target word '{}'", config.target))?;

    if !session.pool().contains(&target) {
        warn!(target = %target, "target is not in the word list");
    }

    let mut guesses: Vec<GuessStep> = Vec::new();
    let mut exhausted = false;

    for _ in 0..config.max_guesses {
        let candidates_before = session.candidate_count();

        let suggestion = match session.next_guess()? {
            NextGuess::Guess(suggestion) => suggestion,
            NextGuess::NoSolution => {
                exhausted = true;
                break;
            }
            NextGuess::Solved { .. } => break,
        };

        let guess = Word::with_length(suggestion.word.as_str(), word_length)
            .with_context(|| format!("unusable suggestion '{}'", suggestion.word))?;
        let feedback = generate(&guess, &target)?;
        session.submit_feedback(&guess, &feedback)?;

        let solved = is_solved(&feedback);
        guesses.push(GuessStep {
            word: suggestion.word,
            feedback,
            candidates_before,
            candidates_after: session.candidate_count(),
            source: suggestion.source,
        });

        if solved {
            return Ok(SolveResult {
                success: true,
                exhausted: false,
                guesses,
                target: config.target,
            });
        }
    }

    Ok(SolveResult {
        success: false,
        exhausted,
        guesses,
        target: config.target,
    })
}
