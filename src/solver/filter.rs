//! Candidate filtering
//!
//! Prunes a word pool down to the words consistent with a
//! [`ConstraintModel`]. Filtering is pure; pool order is preserved.

use super::ConstraintModel;
use crate::core::Word;
use rayon::prelude::*;

/// Pools at least this large are filtered in parallel
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Check whether `word` is consistent with everything the model knows
#[must_use]
pub fn is_candidate(word: &Word, model: &ConstraintModel) -> bool {
    if word.len() != model.word_length() {
        return false;
    }

    let letters = word.chars();

    if !model
        .fixed()
        .iter()
        .all(|(&position, &letter)| letters[position] == letter)
    {
        return false;
    }

    // Present-but-elsewhere: not here, and somewhere else
    if !model.excluded_at().iter().all(|(&position, excluded)| {
        excluded
            .iter()
            .all(|&letter| letters[position] != letter && word.has_letter(letter))
    }) {
        return false;
    }

    model
        .max_count()
        .iter()
        .all(|(&letter, &max)| word.count_of(letter) <= max)
        && model
            .min_count()
            .iter()
            .all(|(&letter, &min)| word.count_of(letter) >= min)
}

/// Words from `pool` that survive the model, in pool order
///
/// At most `limit` words are returned when a limit is given.
///
/// # Examples
/// ```
/// use wordle_hybrid::core::{parse_statuses, Word};
/// use wordle_hybrid::solver::{filter, ConstraintModel};
///
/// let pool: Vec<Word> = ["crane", "slate", "plate", "brick"]
///     .iter()
///     .map(|w| Word::new(*w).unwrap())
///     .collect();
///
/// let mut model = ConstraintModel::new(5);
/// model
///     .update(&Word::new("irate").unwrap(), &parse_statuses("--GGG").unwrap())
///     .unwrap();
///
/// let survivors = filter::apply(&pool, &model, None);
/// assert_eq!(survivors.len(), 2); // slate, plate
/// ```
#[must_use]
pub fn apply(pool: &[Word], model: &ConstraintModel, limit: Option<usize>) -> Vec<Word> {
    if pool.len() >= PARALLEL_THRESHOLD {
        let mut survivors: Vec<Word> = pool
            .par_iter()
            .filter(|word| is_candidate(word, model))
            .cloned()
            .collect();
        if let Some(limit) = limit {
            survivors.truncate(limit);
        }
        return survivors;
    }

    let survivors = pool.iter().filter(|word| is_candidate(word, model)).cloned();
    match limit {
        Some(limit) => survivors.take(limit).collect(),
        None => survivors.collect(),
    }
}
