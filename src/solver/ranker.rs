//! Letter-coverage ranking
//!
//! A word scores the sum, over its distinct letters, of how many current
//! candidates contain that letter. Words that probe common letters rank
//! first. Scores are recomputed from the candidates every round.

use crate::core::Word;
use rustc_hash::FxHashMap;

/// Number of candidates containing each letter
///
/// A candidate with a repeated letter counts it once.
#[must_use]
pub fn letter_frequencies(candidates: &[Word]) -> FxHashMap<u8, usize> {
    let mut frequencies = FxHashMap::default();
    for word in candidates {
        for letter in word.distinct_letters() {
            *frequencies.entry(letter).or_insert(0) += 1;
        }
    }
    frequencies
}

/// Coverage score of `word` under the given frequencies
///
/// # Examples
/// ```
/// use wordle_hybrid::core::Word;
/// use wordle_hybrid::solver::ranker::{letter_frequencies, score_word};
///
/// let candidates = vec![Word::new("apple").unwrap(), Word::new("ample").unwrap()];
/// let freqs = letter_frequencies(&candidates);
///
/// // a, p, l, e each appear in both candidates; the second p adds nothing
/// assert_eq!(score_word(&Word::new("apple").unwrap(), &freqs), 8);
/// ```
#[must_use]
pub fn score_word(word: &Word, frequencies: &FxHashMap<u8, usize>) -> usize {
    word.distinct_letters()
        .map(|letter| frequencies.get(&letter).copied().unwrap_or(0))
        .sum()
}

/// Candidates paired with their scores, best first
///
/// The sort is stable, so equal scores keep their input order.
#[must_use]
pub fn rank_scored(candidates: &[Word]) -> Vec<(Word, usize)> {
    rank_guesses(candidates, candidates)
}

/// Candidates ordered best first
#[must_use]
pub fn rank(candidates: &[Word]) -> Vec<Word> {
    rank_scored(candidates)
        .into_iter()
        .map(|(word, _)| word)
        .collect()
}

/// Score arbitrary guesses against the candidates' letter frequencies
///
/// Useful for probing with words that are no longer candidates themselves.
#[must_use]
pub fn rank_guesses(guesses: &[Word], candidates: &[Word]) -> Vec<(Word, usize)> {
    let frequencies = letter_frequencies(candidates);
    let mut scored: Vec<(Word, usize)> = guesses
        .iter()
        .map(|word| (word.clone(), score_word(word, &frequencies)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
}
