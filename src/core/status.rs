//! Per-letter feedback status
//!
//! Each guessed letter is reported as one of:
//! - `Correct` (green): right letter, right position
//! - `Present` (yellow): letter is in the word, but not here
//! - `Absent` (grey): no further occurrences of the letter

use super::SolverError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback for a single guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    #[serde(alias = "green")]
    Correct,
    #[serde(alias = "yellow")]
    Present,
    #[serde(alias = "grey", alias = "gray")]
    Absent,
}

impl LetterStatus {
    /// Parse a single feedback symbol
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for correct
    /// - 'Y'/'y'/🟨 for present
    /// - '-'/'_'/'X'/'x'/⬜/⬛ for absent
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'G' | 'g' | '🟩' => Some(Self::Correct),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | 'X' | 'x' | '⬜' | '⬛' => Some(Self::Absent),
            _ => None,
        }
    }

    /// ASCII symbol used in status strings
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    /// Emoji square for this status
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        };
        f.write_str(name)
    }
}

/// Parse a status string like "GY-G-" or "🟩🟨⬜🟩⬜"
///
/// Whitespace is ignored.
///
/// # Errors
/// Returns `SolverError::MalformedFeedback` on any unknown symbol.
///
/// # Examples
/// ```
/// use wordle_hybrid::core::{parse_statuses, LetterStatus};
///
/// let statuses = parse_statuses("GY-").unwrap();
/// assert_eq!(
///     statuses,
///     vec![LetterStatus::Correct, LetterStatus::Present, LetterStatus::Absent]
/// );
/// ```
pub fn parse_statuses(input: &str) -> Result<Vec<LetterStatus>, SolverError> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(position, symbol)| {
            LetterStatus::from_symbol(symbol).ok_or_else(|| {
                SolverError::MalformedFeedback(format!(
                    "unknown status symbol '{symbol}' at position {position}"
                ))
            })
        })
        .collect()
}

/// Render statuses as an ASCII status string ("GY-G-")
#[must_use]
pub fn to_symbols(statuses: &[LetterStatus]) -> String {
    statuses.iter().map(|s| s.symbol()).collect()
}

/// Render statuses as emoji squares
#[must_use]
pub fn to_emoji(statuses: &[LetterStatus]) -> String {
    statuses.iter().map(|s| s.emoji()).collect()
}

/// True when every letter is `Correct`
#[must_use]
pub fn is_solved(statuses: &[LetterStatus]) -> bool {
    !statuses.is_empty() && statuses.iter().all(|&s| s == LetterStatus::Correct)
}
