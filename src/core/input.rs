//! Round input normalization
//!
//! Feedback arrives either as a status sequence aligned with the guess or as
//! three letter classes (green by position, yellow by position, grey
//! letters). Both normalize to one `LetterStatus` per guessed letter.

use super::{LetterStatus, SolverError, Word, parse_statuses};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feedback for one round, before normalization
///
/// Deserializes from a JSON string (`"GY-G-"`), an array of statuses
/// (`["green", "absent", ...]`) or a class object:
///
/// ```json
/// { "green": { "0": "a" }, "yellow": { "1": ["l"] }, "grey": ["y"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawFeedbackInput")]
pub enum FeedbackInput {
    /// Status string aligned with the guess
    Aligned(String),
    /// Status sequence aligned with the guess
    Statuses(Vec<LetterStatus>),
    /// Letter classes
    Classes {
        #[serde(default)]
        green: BTreeMap<usize, char>,
        #[serde(default)]
        yellow: BTreeMap<usize, Vec<char>>,
        #[serde(default, alias = "gray")]
        grey: Vec<char>,
    },
}

/// Wire shape of `FeedbackInput`
///
/// Untagged enums buffer their input, which loses serde_json's numeric map
/// key handling, so positions arrive as strings and are parsed here.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFeedbackInput {
    Aligned(String),
    Statuses(Vec<LetterStatus>),
    Classes {
        #[serde(default)]
        green: BTreeMap<String, char>,
        #[serde(default)]
        yellow: BTreeMap<String, Vec<char>>,
        #[serde(default, alias = "gray")]
        grey: Vec<char>,
    },
}

impl TryFrom<RawFeedbackInput> for FeedbackInput {
    type Error = String;

    fn try_from(raw: RawFeedbackInput) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawFeedbackInput::Aligned(text) => Self::Aligned(text),
            RawFeedbackInput::Statuses(statuses) => Self::Statuses(statuses),
            RawFeedbackInput::Classes {
                green,
                yellow,
                grey,
            } => Self::Classes {
                green: parse_positions(green)?,
                yellow: parse_positions(yellow)?,
                grey,
            },
        })
    }
}

fn parse_positions<V>(map: BTreeMap<String, V>) -> Result<BTreeMap<usize, V>, String> {
    map.into_iter()
        .map(|(key, value)| {
            key.trim()
                .parse::<usize>()
                .map(|position| (position, value))
                .map_err(|_| format!("invalid position '{key}'"))
        })
        .collect()
}

impl FeedbackInput {
    /// Normalize to one status per letter of `guess`
    ///
    /// # Errors
    /// - `LengthMismatch` if an aligned form has the wrong number of statuses
    /// - `MalformedFeedback` for unknown symbols, or class feedback that
    ///   leaves a position unclassified, classifies it twice, names a letter
    ///   the guess does not have there, or points past the end of the guess
    pub fn normalize(&self, guess: &Word) -> Result<Vec<LetterStatus>, SolverError> {
        match self {
            Self::Aligned(text) => {
                let statuses = parse_statuses(text)?;
                check_aligned(guess, statuses)
            }
            Self::Statuses(statuses) => check_aligned(guess, statuses.clone()),
            Self::Classes {
                green,
                yellow,
                grey,
            } => normalize_classes(guess, green, yellow, grey),
        }
    }
}

impl From<&str> for FeedbackInput {
    fn from(text: &str) -> Self {
        Self::Aligned(text.to_string())
    }
}

impl From<Vec<LetterStatus>> for FeedbackInput {
    fn from(statuses: Vec<LetterStatus>) -> Self {
        Self::Statuses(statuses)
    }
}

fn check_aligned(
    guess: &Word,
    statuses: Vec<LetterStatus>,
) -> Result<Vec<LetterStatus>, SolverError> {
    if statuses.len() != guess.len() {
        return Err(SolverError::LengthMismatch {
            expected: guess.len(),
            actual: statuses.len(),
        });
    }
    Ok(statuses)
}

fn normalize_classes(
    guess: &Word,
    green: &BTreeMap<usize, char>,
    yellow: &BTreeMap<usize, Vec<char>>,
    grey: &[char],
) -> Result<Vec<LetterStatus>, SolverError> {
    let letters = guess.chars();
    let malformed = |msg: String| Err(SolverError::MalformedFeedback(msg));

    for (&position, &letter) in green {
        let Some(&expected) = letters.get(position) else {
            return malformed(format!("green position {position} is past the end of the guess"));
        };
        if lower(letter) != expected {
            return malformed(format!(
                "green '{letter}' at position {position} but the guess has '{}'",
                expected as char
            ));
        }
    }

    for (&position, marked) in yellow {
        let Some(&expected) = letters.get(position) else {
            return malformed(format!("yellow position {position} is past the end of the guess"));
        };
        if green.contains_key(&position) {
            return malformed(format!("position {position} is both green and yellow"));
        }
        if let Some(&other) = marked.iter().find(|&&c| lower(c) != expected) {
            return malformed(format!(
                "yellow '{other}' at position {position} but the guess has '{}'",
                expected as char
            ));
        }
    }

    let classified =
        |position: usize| green.contains_key(&position) || yellow.contains_key(&position);
    for &marked in grey {
        let letter = lower(marked);
        if !guess.has_letter(letter) {
            return malformed(format!("grey '{marked}' does not appear in the guess"));
        }
        let unclassified = letters
            .iter()
            .enumerate()
            .any(|(position, &c)| c == letter && !classified(position));
        if !unclassified {
            return malformed(format!(
                "grey '{marked}' but every '{marked}' in the guess is green or yellow"
            ));
        }
    }

    letters
        .iter()
        .enumerate()
        .map(|(position, &letter)| {
            if green.get(&position).is_some_and(|&c| lower(c) == letter) {
                Ok(LetterStatus::Correct)
            } else if yellow
                .get(&position)
                .is_some_and(|marked| marked.iter().any(|&c| lower(c) == letter))
            {
                Ok(LetterStatus::Present)
            } else if grey.iter().any(|&c| lower(c) == letter) {
                Ok(LetterStatus::Absent)
            } else {
                Err(SolverError::MalformedFeedback(format!(
                    "position {position} ('{}') has no status",
                    letter as char
                )))
            }
        })
        .collect()
}

/// Lowercased byte for an ASCII letter; anything else maps to 0 and never
/// matches a word letter
fn lower(c: char) -> u8 {
    if c.is_ascii_alphabetic() {
        c.to_ascii_lowercase() as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterStatus::{Absent, Correct, Present};

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn aligned_string_normalizes() {
        let input = FeedbackInput::from("GY-Y-");
        assert_eq!(
            input.normalize(&word("alley")).unwrap(),
            vec![Correct, Present, Absent, Present, Absent]
        );
    }

    #[test]
    fn aligned_wrong_length_is_length_mismatch() {
        let input = FeedbackInput::from("GY-");
        assert_eq!(
            input.normalize(&word("alley")),
            Err(SolverError::LengthMismatch {
                expected: 5,
                actual: 3
            })
        );
    }

    #[test]
    fn classes_normalize_with_duplicate_letters() {
        // alley vs apple: second l is grey while the first is yellow
        let input: FeedbackInput = serde_json::from_str(
            r#"{"green": {"0": "a"}, "yellow": {"1": ["l"], "3": ["E"]}, "grey": ["l", "y"]}"#,
        )
        .unwrap();

        assert_eq!(
            input.normalize(&word("alley")).unwrap(),
            vec![Correct, Present, Absent, Present, Absent]
        );
    }

    #[test]
    fn classes_missing_position_is_malformed() {
        let input = FeedbackInput::Classes {
            green: BTreeMap::from([(0, 'c')]),
            yellow: BTreeMap::new(),
            grey: vec!['r', 'a', 'n'],
        };
        assert!(matches!(
            input.normalize(&word("crane")),
            Err(SolverError::MalformedFeedback(_))
        ));
    }

    #[test]
    fn classes_green_letter_must_match_guess() {
        let input = FeedbackInput::Classes {
            green: BTreeMap::from([(0, 'z')]),
            yellow: BTreeMap::new(),
            grey: vec!['c', 'r', 'a', 'n', 'e'],
        };
        assert!(matches!(
            input.normalize(&word("crane")),
            Err(SolverError::MalformedFeedback(_))
        ));
    }

    #[test]
    fn classes_green_and_yellow_at_same_position_is_malformed() {
        let input = FeedbackInput::Classes {
            green: BTreeMap::from([(0, 'c')]),
            yellow: BTreeMap::from([(0, vec!['c'])]),
            grey: vec!['r', 'a', 'n', 'e'],
        };
        assert!(matches!(
            input.normalize(&word("crane")),
            Err(SolverError::MalformedFeedback(_))
        ));
    }

    #[test]
    fn classes_position_out_of_range_is_malformed() {
        let input = FeedbackInput::Classes {
            green: BTreeMap::from([(7, 'c')]),
            yellow: BTreeMap::new(),
            grey: vec!['c', 'r', 'a', 'n', 'e'],
        };
        assert!(matches!(
            input.normalize(&word("crane")),
            Err(SolverError::MalformedFeedback(_))
        ));
    }

    #[test]
    fn classes_stray_grey_letter_is_malformed() {
        let input = FeedbackInput::Classes {
            green: BTreeMap::new(),
            yellow: BTreeMap::new(),
            grey: vec!['c', 'r', 'a', 'n', 'e', 'z'],
        };
        assert!(matches!(
            input.normalize(&word("crane")),
            Err(SolverError::MalformedFeedback(_))
        ));
    }

    #[test]
    fn classes_grey_letter_already_green_is_malformed() {
        let input = FeedbackInput::Classes {
            green: BTreeMap::from([(0, 'c')]),
            yellow: BTreeMap::new(),
            grey: vec!['c', 'r', 'a', 'n', 'e'],
        };
        assert!(matches!(
            input.normalize(&word("crane")),
            Err(SolverError::MalformedFeedback(_))
        ));
    }

    #[test]
    fn classes_grey_duplicate_beside_green_copy() {
        // one e is green, the other copy is grey
        let input = FeedbackInput::Classes {
            green: BTreeMap::from([(0, 's'), (2, 'e')]),
            yellow: BTreeMap::from([(4, vec!['p'])]),
            grey: vec!['h', 'e'],
        };
        assert_eq!(
            input.normalize(&word("sheep")).unwrap(),
            vec![Correct, Absent, Correct, Absent, Present]
        );
    }

    #[test]
    fn json_rejects_non_numeric_position() {
        let parsed = serde_json::from_str::<FeedbackInput>(r#"{"green": {"first": "a"}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn json_forms_deserialize() {
        let aligned: FeedbackInput = serde_json::from_str(r#""G----""#).unwrap();
        assert_eq!(aligned, FeedbackInput::Aligned("G----".to_string()));

        let statuses: FeedbackInput =
            serde_json::from_str(r#"["green", "grey", "grey", "grey", "yellow"]"#).unwrap();
        assert_eq!(
            statuses.normalize(&word("crane")).unwrap(),
            vec![Correct, Absent, Absent, Absent, Present]
        );
    }
}
