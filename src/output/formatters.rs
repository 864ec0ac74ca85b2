//! Formatting utilities for terminal output

use crate::core::LetterStatus;
use crate::solver::GuessSource;
use colored::{ColoredString, Colorize};

/// Color each letter of `word` by its feedback, Wordle style
#[must_use]
pub fn colored_feedback(word: &str, feedback: &[LetterStatus]) -> String {
    word.chars()
        .zip(feedback)
        .map(|(letter, status)| colored_tile(letter, *status).to_string())
        .collect()
}

fn colored_tile(letter: char, status: LetterStatus) -> ColoredString {
    let tile = format!(" {} ", letter.to_ascii_uppercase());
    match status {
        LetterStatus::Correct => tile.black().on_green().bold(),
        LetterStatus::Present => tile.black().on_yellow().bold(),
        LetterStatus::Absent => tile.white().on_bright_black(),
    }
}

/// Short label for where a guess came from
#[must_use]
pub fn source_label(source: &GuessSource) -> String {
    match source {
        GuessSource::Oracle { .. } => "oracle".to_string(),
        GuessSource::Ranked { score } => format!("ranked ({score})"),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_tiles_keep_letters_in_order() {
        let feedback = [
            LetterStatus::Correct,
            LetterStatus::Present,
            LetterStatus::Absent,
        ];
        let rendered = colored_feedback("abc", &feedback);

        let a = rendered.find('A').unwrap();
        let b = rendered.find('B').unwrap();
        let c = rendered.find('C').unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn source_labels() {
        let oracle = GuessSource::Oracle {
            explanation: "covers r and t".to_string(),
        };
        assert_eq!(source_label(&oracle), "oracle");
        assert_eq!(source_label(&GuessSource::Ranked { score: 17 }), "ranked (17)");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
