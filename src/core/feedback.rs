//! Ground-truth feedback generation
//!
//! Compares a guess against a hidden target the way the game does. This is
//! the reference both for simulating an opponent and for checking that the
//! candidate filter never eliminates the real answer.

use super::{LetterStatus, SolverError, Word};
use rustc_hash::FxHashMap;

/// Generate the feedback `guess` receives when `target` is the answer
///
/// # Algorithm
/// 1. First pass: mark exact position matches `Correct` and consume them
/// 2. Second pass: mark a remaining letter `Present` while the target still
///    has unconsumed occurrences of it, otherwise `Absent`
///
/// # Errors
/// Returns `SolverError::LengthMismatch` if the words differ in length.
///
/// # Examples
/// ```
/// use wordle_hybrid::core::{generate, LetterStatus::*, Word};
///
/// let guess = Word::new("alley").unwrap();
/// let target = Word::new("apple").unwrap();
///
/// assert_eq!(
///     generate(&guess, &target).unwrap(),
///     vec![Correct, Present, Absent, Present, Absent]
/// );
/// ```
pub fn generate(guess: &Word, target: &Word) -> Result<Vec<LetterStatus>, SolverError> {
    if guess.len() != target.len() {
        return Err(SolverError::LengthMismatch {
            expected: target.len(),
            actual: guess.len(),
        });
    }

    let mut result = vec![LetterStatus::Absent; guess.len()];
    let available = target.char_counts();
    let mut consumed: FxHashMap<u8, usize> = FxHashMap::default();

    // First pass: greens
    for (i, (&g, &t)) in guess.chars().iter().zip(target.chars()).enumerate() {
        if g == t {
            result[i] = LetterStatus::Correct;
            *consumed.entry(g).or_insert(0) += 1;
        }
    }

    // Second pass: yellows from whatever the greens left over
    for (i, &g) in guess.chars().iter().enumerate() {
        if result[i] == LetterStatus::Correct {
            continue;
        }
        let total = available.get(&g).copied().unwrap_or(0);
        let used = consumed.entry(g).or_insert(0);
        if total > *used {
            result[i] = LetterStatus::Present;
            *used += 1;
        }
    }

    Ok(result)
}
