//! Word pools
//!
//! A [`WordPool`] is the immutable dictionary a session filters. Cloning is
//! a reference-count bump, so many sessions can share one pool across
//! threads.

mod embedded;
pub mod loader;

pub use embedded::{EMBEDDED_EN, EMBEDDED_WORD_LENGTH};

use crate::core::{SolverError, Word};
use std::sync::Arc;

/// Ordered, shared list of words of one length
#[derive(Debug, Clone)]
pub struct WordPool {
    word_length: usize,
    words: Arc<[Word]>,
}

impl WordPool {
    /// Build a pool, rejecting words of any other length
    ///
    /// Duplicates are kept.
    ///
    /// # Errors
    /// Returns `SolverError::LengthMismatch` for the first word whose length
    /// differs from `word_length`.
    pub fn new(word_length: usize, words: Vec<Word>) -> Result<Self, SolverError> {
        if let Some(word) = words.iter().find(|w| w.len() != word_length) {
            return Err(SolverError::LengthMismatch {
                expected: word_length,
                actual: word.len(),
            });
        }
        Ok(Self {
            word_length,
            words: words.into(),
        })
    }

    /// Build a pool from plain strings
    ///
    /// # Errors
    /// `InvalidWord` for text that is not a word, `LengthMismatch` as for
    /// [`WordPool::new`].
    ///
    /// # Examples
    /// ```
    /// use wordle_hybrid::wordlists::WordPool;
    ///
    /// let pool = WordPool::from_strs(5, &["crane", "slate"]).unwrap();
    /// assert_eq!(pool.len(), 2);
    /// assert!(WordPool::from_strs(5, &["crane", "ox"]).is_err());
    /// ```
    pub fn from_strs(word_length: usize, words: &[&str]) -> Result<Self, SolverError> {
        let words = words
            .iter()
            .map(|&text| Word::new(text))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(word_length, words)
    }

    /// Keep the words of `word_length` letters and drop the rest
    #[must_use]
    pub fn from_words(word_length: usize, words: Vec<Word>) -> Self {
        let words: Vec<Word> = words
            .into_iter()
            .filter(|w| w.len() == word_length)
            .collect();
        Self {
            word_length,
            words: words.into(),
        }
    }

    /// The built-in English list
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_words(
            EMBEDDED_WORD_LENGTH,
            loader::parse_words(EMBEDDED_EN, EMBEDDED_WORD_LENGTH),
        )
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }
}
