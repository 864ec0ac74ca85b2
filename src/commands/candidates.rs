//! Candidate listing command
//!
//! Applies rounds given on the command line and reports what is left.

use crate::core::{LetterStatus, Word, parse_statuses};
use crate::solver::{ConstraintSummary, SolverSession};
use anyhow::{Context, Result, anyhow};

/// What the accumulated rounds leave behind
#[derive(Debug)]
pub struct CandidatesReport {
    pub rounds: usize,
    pub summary: ConstraintSummary,
    pub candidate_count: usize,
    /// Best-ranked candidates with their letter-coverage scores
    pub top: Vec<(String, usize)>,
}

/// Parse a `guess:pattern` round such as `crane:GY-G-`
///
/// # Errors
/// Returns an error if the separator is missing, the guess is not a word
/// of `word_length` letters, or the pattern has unknown symbols.
pub fn parse_round(round: &str, word_length: usize) -> Result<(Word, Vec<LetterStatus>)> {
    let (guess, pattern) = round
        .split_once(':')
        .ok_or_else(|| anyhow!("round '{round}' must look like guess:pattern"))?;

    let guess = Word::with_length(guess.trim(), word_length)
        .with_context(|| format!("invalid guess in round '{round}'"))?;
    let feedback = parse_statuses(pattern)
        .with_context(|| format!("invalid pattern in round '{round}'"))?;

    Ok((guess, feedback))
}

/// Apply `rounds` in order and report the survivors
///
/// # Errors
/// Returns an error naming the first round that fails to parse or that
/// the session rejects.
pub fn list_candidates(
    mut session: SolverSession,
    rounds: &[String],
    top_n: usize,
) -> Result<CandidatesReport> {
    let word_length = session.pool().word_length();

    for (i, round) in rounds.iter().enumerate() {
        let (guess, feedback) = parse_round(round, word_length)?;
        session
            .submit_feedback(&guess, &feedback)
            .with_context(|| format!("round {} ('{round}') rejected", i + 1))?;
    }

    Ok(CandidatesReport {
        rounds: rounds.len(),
        summary: session.model().summary(),
        candidate_count: session.candidate_count(),
        top: session
            .ranked()
            .iter()
            .take(top_n)
            .map(|(word, score)| (word.text().to_string(), *score))
            .collect(),
    })
}
