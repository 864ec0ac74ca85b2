//! Simple interactive CLI mode
//!
//! Line-based solver loop without the TUI. Reads commands and feedback from
//! any `BufRead` and writes to any `Write`, so whole games can be scripted.

use crate::core::{FeedbackInput, LetterStatus, Word, to_emoji};
use crate::solver::{GuessSource, NextGuess, SessionState, SolverSession, Suggestion};
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewGame,
    Undo,
    /// The suggested word was right
    Win,
    /// Feedback, optionally for a word other than the suggestion
    Feedback {
        word: Option<String>,
        input: FeedbackInput,
    },
}

/// Parse a line of user input
///
/// Accepts the commands `quit`, `new`, `undo` and `win`, a status string
/// (`GY-G-`, `🟩🟨⬜🟩⬜`), class-form JSON (`{"green": {"0": "c"}, ...}`), or
/// either feedback form preceded by the word that was actually played.
///
/// # Errors
/// Returns a message for JSON that does not describe feedback.
pub fn parse_line(line: &str) -> Result<Command, String> {
    let line = line.trim();

    match line.to_lowercase().as_str() {
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "new" | "n" => return Ok(Command::NewGame),
        "undo" | "u" => return Ok(Command::Undo),
        "win" | "correct" | "solved" => return Ok(Command::Win),
        _ => {}
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((first, rest)) if is_word_token(first) => (Some(first.to_lowercase()), rest.trim()),
        _ => (None, line),
    };

    let input = if rest.starts_with('{') {
        serde_json::from_str(rest).map_err(|e| format!("invalid feedback JSON: {e}"))?
    } else {
        FeedbackInput::Aligned(rest.to_string())
    };

    Ok(Command::Feedback { word, input })
}

/// A leading token is a played word if it is alphabetic and cannot be read
/// as status symbols
fn is_word_token(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_alphabetic())
        && token
            .chars()
            .any(|c| LetterStatus::from_symbol(c).is_none())
}

/// Run the simple interactive CLI mode
///
/// Returns when the user quits, declines another game, or input ends.
///
/// # Errors
///
/// Returns an error on I/O failure, or if a session operation fails in a
/// way the loop cannot recover from.
pub fn run_simple<R: BufRead, W: Write>(
    mut session: SolverSession,
    reader: R,
    out: &mut W,
) -> Result<()> {
    print_banner(out)?;
    let mut lines = reader.lines();

    'game: loop {
        let suggestion = match session.next_guess()? {
            NextGuess::Guess(suggestion) => {
                print_suggestion(out, &session, &suggestion)?;
                Some(suggestion)
            }
            NextGuess::NoSolution => {
                writeln!(out, "\n❌ No candidates remain! Your feedback may be incorrect.")?;
                writeln!(out, "Type 'undo' to go back, or 'new' to start over.\n")?;
                None
            }
            NextGuess::Solved { .. } => None,
        };

        loop {
            write!(out, "Feedback (G/Y/-, 'win', or command): ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(out, "❌ {message}\n")?;
                    continue;
                }
            };

            let (word, input) = match command {
                Command::Quit => {
                    writeln!(out, "\n👋 Thanks for playing!\n")?;
                    return Ok(());
                }
                Command::NewGame => {
                    session = fresh_session(&session);
                    writeln!(out, "\n🔄 New game started!\n")?;
                    continue 'game;
                }
                Command::Undo => {
                    if let Some(previous) = undo(&session)? {
                        session = previous;
                        writeln!(
                            out,
                            "✓ Undone! Back to turn {}\n",
                            session.history().len() + 1
                        )?;
                        continue 'game;
                    }
                    writeln!(out, "Nothing to undo!\n")?;
                    continue;
                }
                Command::Win => {
                    let correct = vec![LetterStatus::Correct; session.pool().word_length()];
                    (None, FeedbackInput::Statuses(correct))
                }
                Command::Feedback { word, input } => (word, input),
            };

            let Some(played) = word.or_else(|| suggestion.as_ref().map(|s| s.word.clone())) else {
                writeln!(out, "No suggestion to give feedback on; use 'undo' or 'new'.\n")?;
                continue;
            };

            let guess = match Word::with_length(played.as_str(), session.pool().word_length()) {
                Ok(guess) => guess,
                Err(e) => {
                    writeln!(out, "❌ '{played}': {e}\n")?;
                    continue;
                }
            };

            match session.submit_input(&guess, &input) {
                Ok(SessionState::Solved) => {
                    print_victory(out, &session)?;
                    if !play_again(&mut lines, out)? {
                        writeln!(out, "\n👋 Thanks for playing!\n")?;
                        return Ok(());
                    }
                    session = fresh_session(&session);
                    writeln!(out, "\n🔄 New game started!\n")?;
                    continue 'game;
                }
                Ok(_) => continue 'game,
                Err(e) => writeln!(out, "❌ {e}\n")?,
            }
        }
    }
}

fn fresh_session(session: &SolverSession) -> SolverSession {
    SolverSession::with_oracle(
        session.pool().clone(),
        session.config().clone(),
        session.oracle(),
    )
}

/// Session with the last round removed, or `None` if nothing was played
fn undo(session: &SolverSession) -> Result<Option<SolverSession>> {
    let history = session.history();
    if history.is_empty() {
        return Ok(None);
    }
    let previous = SolverSession::replay(
        session.pool().clone(),
        session.config().clone(),
        session.oracle(),
        &history[..history.len() - 1],
    )?;
    Ok(Some(previous))
}

fn play_again<I, W>(lines: &mut I, out: &mut W) -> Result<bool>
where
    I: Iterator<Item = std::io::Result<String>>,
    W: Write,
{
    write!(out, "Play again? (yes/no): ")?;
    out.flush()?;
    let answer = match lines.next() {
        Some(line) => line?,
        None => return Ok(false),
    };
    Ok(matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
}

fn print_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║               Hybrid Wordle Solver - Interactive             ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;

    writeln!(out, "I'll suggest guesses from the words that still fit your feedback.")?;
    writeln!(out, "After each guess, enter the feedback pattern:\n")?;
    writeln!(out, "  - Use G/g/🟩 for green (correct position)")?;
    writeln!(out, "  - Use Y/y/🟨 for yellow (wrong position)")?;
    writeln!(out, "  - Use -/_/x/⬜ for gray (not in word)")?;
    writeln!(out, "  - Or paste JSON: {{\"green\": {{\"0\": \"c\"}}, \"yellow\": {{}}, \"grey\": [...]}}")?;
    writeln!(out, "  - Prefix with a word if you played something else: crane GY-G-")?;
    writeln!(out, "  - Or type 'win' if you got it right!\n")?;
    writeln!(out, "Commands: 'quit' to exit, 'new' for new game, 'undo' to undo last guess\n")?;
    Ok(())
}

fn print_suggestion<W: Write>(
    out: &mut W,
    session: &SolverSession,
    suggestion: &Suggestion,
) -> Result<()> {
    let turn = session.history().len() + 1;
    writeln!(out, "────────────────────────────────────────────────────────────")?;
    writeln!(
        out,
        "Turn {turn}: {} candidates remaining",
        suggestion.candidate_count
    )?;
    writeln!(out, "────────────────────────────────────────────────────────────")?;

    writeln!(out, "\n📊 Suggested guess: {}", suggestion.word.to_uppercase())?;
    match &suggestion.source {
        GuessSource::Oracle { explanation } => {
            writeln!(out, "   Source:           oracle")?;
            if !explanation.is_empty() {
                writeln!(out, "   Why:              {explanation}")?;
            }
        }
        GuessSource::Ranked { score } => {
            writeln!(out, "   Source:           letter coverage")?;
            writeln!(out, "   Score:            {score}")?;
        }
    }
    writeln!(out)?;

    if suggestion.candidate_count <= 10 {
        writeln!(out, "Remaining candidates:")?;
        for candidate in session.candidates() {
            writeln!(out, "  • {}", candidate.text().to_uppercase())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_victory<W: Write>(out: &mut W, session: &SolverSession) -> Result<()> {
    let turns = session.history().len();

    writeln!(out, "\n{}", "═".repeat(70).bright_cyan())?;
    writeln!(
        out,
        "{}",
        "    🎉 🎊 ✨  W O R D L E   S O L V E D !  ✨ 🎊 🎉    "
            .bright_green()
            .bold()
    )?;
    writeln!(out, "{}", "═".repeat(70).bright_cyan())?;

    let performance = match turns {
        1 => ("🏆 Perfect!", "Incredible hole-in-one!"),
        2 => ("⭐ Excellent!", "Outstanding performance!"),
        3 => ("💫 Great!", "Very well played!"),
        4 => ("✨ Good!", "Nice work!"),
        5 => ("👍 Solved!", "Got it!"),
        _ => ("✓ Complete!", "Success!"),
    };

    writeln!(out, "\n  {}", performance.0.bright_yellow().bold())?;
    writeln!(out, "  {}", performance.1.bright_white())?;
    writeln!(
        out,
        "\n  Solution found in {turns} {}",
        if turns == 1 { "guess" } else { "guesses" }
    )?;

    writeln!(out, "\n  Guess history:")?;
    for (i, record) in session.history().iter().enumerate() {
        writeln!(
            out,
            "    {}. {} {}",
            (i + 1).to_string().bright_black(),
            record.guess().text().to_uppercase().bright_white().bold(),
            to_emoji(record.feedback())
        )?;
    }

    writeln!(out, "\n{}", "═".repeat(70).bright_cyan())?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::wordlists::WordPool;

    fn session() -> SolverSession {
        let pool = WordPool::from_strs(5, &["crane", "slate", "plate"]).unwrap();
        SolverSession::new(pool, SessionConfig::default())
    }

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_simple(session(), script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_line("quit"), Ok(Command::Quit));
        assert_eq!(parse_line(" UNDO "), Ok(Command::Undo));
        assert_eq!(parse_line("n"), Ok(Command::NewGame));
        assert_eq!(parse_line("win"), Ok(Command::Win));
    }

    #[test]
    fn parse_feedback_forms() {
        assert_eq!(
            parse_line("GY-G-"),
            Ok(Command::Feedback {
                word: None,
                input: FeedbackInput::Aligned("GY-G-".to_string())
            })
        );
        assert_eq!(
            parse_line("crane GY-G-"),
            Ok(Command::Feedback {
                word: Some("crane".to_string()),
                input: FeedbackInput::Aligned("GY-G-".to_string())
            })
        );
        // spaced status symbols are not a word
        assert_eq!(
            parse_line("g y - g -"),
            Ok(Command::Feedback {
                word: None,
                input: FeedbackInput::Aligned("g y - g -".to_string())
            })
        );
        assert!(matches!(
            parse_line(r#"crane {"grey": ["c", "r", "a", "n", "e"]}"#),
            Ok(Command::Feedback {
                word: Some(_),
                input: FeedbackInput::Classes { .. }
            })
        ));
        assert!(parse_line("{not json").is_err());
    }

    #[test]
    fn quit_immediately() {
        let output = run("quit\n");
        assert!(output.contains("Suggested guess: SLATE"));
        assert!(output.contains("Thanks for playing"));
    }

    #[test]
    fn plays_to_victory() {
        let output = run("-GGGG\nwin\nno\n");
        assert!(output.contains("Suggested guess: PLATE"));
        assert!(output.contains("Solution found in 2 guesses"));
        assert!(output.contains("🟩🟩🟩🟩🟩"));
    }

    #[test]
    fn undo_restores_previous_turn() {
        let output = run("-GGGG\nundo\nquit\n");
        assert!(output.contains("Undone! Back to turn 1"));
        assert_eq!(output.matches("Suggested guess: SLATE").count(), 2);
    }

    #[test]
    fn undo_with_nothing_played() {
        let output = run("undo\nquit\n");
        assert!(output.contains("Nothing to undo"));
    }

    #[test]
    fn malformed_feedback_reprompts() {
        let output = run("GQ---\nquit\n");
        assert!(output.contains("malformed feedback"));
        assert_eq!(output.matches("Suggested guess: SLATE").count(), 1);
    }

    #[test]
    fn json_feedback_accepted() {
        let script = concat!(
            r#"{"green": {"1": "l", "2": "a", "3": "t", "4": "e"}, "grey": ["s"]}"#,
            "\nquit\n"
        );
        let output = run(script);
        assert!(output.contains("Turn 2: 1 candidates remaining"));
    }

    #[test]
    fn other_word_feedback() {
        let output = run("crane --G-G\nquit\n");
        assert!(output.contains("Turn 2: 2 candidates remaining"));
    }

    #[test]
    fn contradictory_feedback_exhausts_then_new_game() {
        let output = run("Y----\nGGGGG\nnew\nquit\n");
        assert!(output.contains("No candidates remain"));
        assert!(output.contains("No suggestion to give feedback on"));
        assert!(output.contains("New game started"));
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let output = run("");
        assert!(output.contains("Suggested guess"));
    }
}
