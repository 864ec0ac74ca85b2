//! Accumulated knowledge about the hidden word
//!
//! Feedback from every round is folded into four pieces of state:
//! fixed positions, letters excluded at a position, and lower and upper
//! bounds on how often each letter occurs.
//!
//! Absent marks are only resolved after the rest of the round is counted:
//! a grey letter next to a green or yellow copy of itself caps the count at
//! the confirmed copies instead of removing the letter altogether.

use crate::core::{Conflict, LetterStatus, SolverError, Word};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Canonical constraint state for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintModel {
    word_length: usize,
    fixed: BTreeMap<usize, u8>,
    excluded_at: BTreeMap<usize, BTreeSet<u8>>,
    min_count: BTreeMap<u8, usize>,
    max_count: BTreeMap<u8, usize>,
}

impl ConstraintModel {
    /// Empty model for words of `word_length` letters
    #[must_use]
    pub fn new(word_length: usize) -> Self {
        Self {
            word_length,
            fixed: BTreeMap::new(),
            excluded_at: BTreeMap::new(),
            min_count: BTreeMap::new(),
            max_count: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    /// Positions proven correct
    #[must_use]
    pub const fn fixed(&self) -> &BTreeMap<usize, u8> {
        &self.fixed
    }

    /// Letters known to be in the word but not at the keyed position
    #[must_use]
    pub const fn excluded_at(&self) -> &BTreeMap<usize, BTreeSet<u8>> {
        &self.excluded_at
    }

    /// Minimum confirmed occurrences per letter
    #[must_use]
    pub const fn min_count(&self) -> &BTreeMap<u8, usize> {
        &self.min_count
    }

    /// Upper bound on occurrences; a missing letter is unbounded
    #[must_use]
    pub const fn max_count(&self) -> &BTreeMap<u8, usize> {
        &self.max_count
    }

    /// Fold one round of feedback into the model
    ///
    /// The update is atomic: on error the model is left exactly as it was.
    ///
    /// # Errors
    /// - `LengthMismatch` if the guess does not have `word_length` letters,
    ///   or the feedback is not aligned with the guess
    /// - `Conflict` if the feedback contradicts earlier rounds
    ///
    /// # Examples
    /// ```
    /// use wordle_hybrid::core::{parse_statuses, Word};
    /// use wordle_hybrid::solver::ConstraintModel;
    ///
    /// let mut model = ConstraintModel::new(5);
    /// let guess = Word::new("alley").unwrap();
    /// model.update(&guess, &parse_statuses("GY-Y-").unwrap()).unwrap();
    ///
    /// // One l confirmed, the grey second l caps it at one
    /// assert_eq!(model.min_count().get(&b'l'), Some(&1));
    /// assert_eq!(model.max_count().get(&b'l'), Some(&1));
    /// assert_eq!(model.max_count().get(&b'y'), Some(&0));
    /// ```
    pub fn update(&mut self, guess: &Word, feedback: &[LetterStatus]) -> Result<(), SolverError> {
        if guess.len() != self.word_length {
            return Err(SolverError::LengthMismatch {
                expected: self.word_length,
                actual: guess.len(),
            });
        }
        if feedback.len() != guess.len() {
            return Err(SolverError::LengthMismatch {
                expected: guess.len(),
                actual: feedback.len(),
            });
        }

        let mut next = self.clone();
        next.absorb(guess, feedback)?;
        next.check_consistency()?;
        *self = next;
        Ok(())
    }

    fn absorb(&mut self, guess: &Word, feedback: &[LetterStatus]) -> Result<(), Conflict> {
        let mut confirmed: BTreeMap<u8, usize> = BTreeMap::new();
        let mut absent_at: Vec<(usize, u8)> = Vec::new();

        for (position, (&letter, &status)) in guess.chars().iter().zip(feedback).enumerate() {
            match status {
                LetterStatus::Correct => {
                    if let Some(&fixed) = self.fixed.get(&position) {
                        if fixed != letter {
                            return Err(Conflict::FixedMismatch {
                                position,
                                fixed: fixed as char,
                                reported: letter as char,
                            });
                        }
                    }
                    self.fixed.insert(position, letter);
                    *confirmed.entry(letter).or_insert(0) += 1;
                }
                LetterStatus::Present => {
                    self.excluded_at.entry(position).or_default().insert(letter);
                    *confirmed.entry(letter).or_insert(0) += 1;
                }
                LetterStatus::Absent => absent_at.push((position, letter)),
            }
        }

        // Grey letters are resolved against this round's confirmed copies
        for &(position, letter) in &absent_at {
            let copies = confirmed.get(&letter).copied().unwrap_or(0);
            let bound = self.max_count.entry(letter).or_insert(copies);
            *bound = (*bound).min(copies);
            if copies > 0 {
                self.excluded_at.entry(position).or_default().insert(letter);
            }
        }

        for (letter, copies) in confirmed {
            let bound = self.min_count.entry(letter).or_insert(copies);
            *bound = (*bound).max(copies);
        }

        Ok(())
    }

    /// Smallest number of occurrences any surviving word must have
    fn effective_min(&self, letter: u8) -> usize {
        let fixed = self.fixed.values().filter(|&&l| l == letter).count();
        self.min_count.get(&letter).copied().unwrap_or(0).max(fixed)
    }

    fn check_consistency(&self) -> Result<(), Conflict> {
        for (&position, &letter) in &self.fixed {
            if self
                .excluded_at
                .get(&position)
                .is_some_and(|letters| letters.contains(&letter))
            {
                return Err(Conflict::ExcludedAtFixed {
                    position,
                    letter: letter as char,
                });
            }
        }

        let letters: BTreeSet<u8> = self
            .min_count
            .keys()
            .chain(self.fixed.values())
            .copied()
            .collect();

        let mut required = 0;
        for letter in letters {
            let min = self.effective_min(letter);
            if let Some(&max) = self.max_count.get(&letter) {
                if min > max {
                    return Err(Conflict::CountRange {
                        letter: letter as char,
                        min,
                        max,
                    });
                }
            }
            required += min;
        }

        if required > self.word_length {
            return Err(Conflict::TooManyLetters {
                required,
                word_length: self.word_length,
            });
        }

        Ok(())
    }

    /// Readable snapshot of the model, for prompts and display
    #[must_use]
    pub fn summary(&self) -> ConstraintSummary {
        let to_char = |b: &u8| *b as char;
        ConstraintSummary {
            word_length: self.word_length,
            fixed: self.fixed.iter().map(|(&p, l)| (p, to_char(l))).collect(),
            excluded_at: self
                .excluded_at
                .iter()
                .map(|(&p, letters)| (p, letters.iter().map(to_char).collect()))
                .collect(),
            min_count: self.min_count.iter().map(|(l, &n)| (to_char(l), n)).collect(),
            max_count: self
                .max_count
                .iter()
                .filter(|&(_, &n)| n > 0)
                .map(|(l, &n)| (to_char(l), n))
                .collect(),
            absent: self
                .max_count
                .iter()
                .filter(|&(_, &n)| n == 0)
                .map(|(l, _)| to_char(l))
                .collect(),
        }
    }
}

/// Serializable view of a [`ConstraintModel`]
///
/// `max_count` only lists letters that may still occur; letters capped at
/// zero are in `absent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintSummary {
    pub word_length: usize,
    pub fixed: BTreeMap<usize, char>,
    pub excluded_at: BTreeMap<usize, Vec<char>>,
    pub min_count: BTreeMap<char, usize>,
    pub max_count: BTreeMap<char, usize>,
    pub absent: Vec<char>,
}

impl ConstraintSummary {
    /// Known positions as a mask, e.g. `"__a_e"`
    #[must_use]
    pub fn mask(&self) -> String {
        (0..self.word_length)
            .map(|p| self.fixed.get(&p).copied().unwrap_or('_'))
            .collect()
    }
}

impl fmt::Display for ConstraintSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "known:    {}", self.mask())?;

        let excluded: Vec<String> = self
            .excluded_at
            .iter()
            .map(|(p, letters)| format!("{p}:{}", letters.iter().collect::<String>()))
            .collect();
        writeln!(f, "not at:   {}", excluded.join(" "))?;

        let at_least: Vec<String> = self
            .min_count
            .iter()
            .map(|(l, n)| format!("{l}>={n}"))
            .collect();
        writeln!(f, "at least: {}", at_least.join(" "))?;

        let at_most: Vec<String> = self
            .max_count
            .iter()
            .map(|(l, n)| format!("{l}<={n}"))
            .collect();
        writeln!(f, "at most:  {}", at_most.join(" "))?;

        write!(f, "absent:   {}", self.absent.iter().collect::<String>())
    }
}
