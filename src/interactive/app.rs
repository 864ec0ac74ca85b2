//! TUI application state and logic

use crate::core::{FeedbackInput, LetterStatus, Word};
use crate::solver::{NextGuess, SessionState, SolverSession, Suggestion, ranker};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::BTreeMap;
use std::io;

/// Application state
pub struct App {
    pub session: SolverSession,
    pub history: Vec<HistoryEntry>,
    /// Suggestion for the current turn
    pub current_guess: Option<Suggestion>,
    /// Word typed with Tab, played instead of the suggestion
    pub manual_guess: Option<String>,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub manual_word: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Feedback,
    ManualWord,
    WinCelebration,
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub guess: String,
    pub feedback: Vec<LetterStatus>,
    pub from_oracle: bool,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub games_won: usize,
    /// Games won, keyed by guess count
    pub guess_distribution: BTreeMap<usize, usize>,
}

impl App {
    #[must_use]
    pub fn new(session: SolverSession) -> Self {
        Self {
            session,
            history: Vec::new(),
            current_guess: None,
            manual_guess: None,
            input_buffer: String::new(),
            messages: vec![
                Message {
                    text: "Welcome! I'll suggest guesses from the words that still fit."
                        .to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Enter feedback pattern (e.g., 'GY-GY' or '🟩🟨⬜🟩🟨')".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Feedback,
            manual_word: String::new(),
        }
    }

    /// Ask the session for the next guess
    pub fn compute_suggestion(&mut self) {
        match self.session.next_guess() {
            Ok(NextGuess::Guess(suggestion)) => self.current_guess = Some(suggestion),
            Ok(NextGuess::NoSolution) => {
                self.current_guess = None;
                self.add_message(
                    "No candidates remain - feedback may be incorrect. Press 'u' to undo.",
                    MessageStyle::Error,
                );
            }
            Ok(NextGuess::Solved { .. }) => self.current_guess = None,
            Err(e) => {
                self.current_guess = None;
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    /// The word feedback applies to: the manual guess, else the suggestion
    #[must_use]
    pub fn active_word(&self) -> Option<&str> {
        self.manual_guess
            .as_deref()
            .or_else(|| self.current_guess.as_ref().map(|s| s.word.as_str()))
    }

    pub fn handle_feedback(&mut self, feedback: &str) {
        let Some(played) = self.active_word().map(str::to_string) else {
            self.add_message(
                "No guess to give feedback on. Press 'u' to undo or 'n' for a new game.",
                MessageStyle::Error,
            );
            return;
        };

        let guess = match Word::with_length(played.as_str(), self.word_length()) {
            Ok(guess) => guess,
            Err(e) => {
                self.add_message(&format!("'{played}': {e}"), MessageStyle::Error);
                return;
            }
        };

        let candidates_before = self.session.candidate_count();
        let input = FeedbackInput::Aligned(feedback.to_string());
        let state = match self.session.submit_input(&guess, &input) {
            Ok(state) => state,
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        };

        let from_oracle = self.manual_guess.is_none()
            && self
                .current_guess
                .as_ref()
                .is_some_and(|s| s.source.is_oracle());
        let feedback = self
            .session
            .history()
            .last()
            .map(|record| record.feedback().to_vec())
            .unwrap_or_default();

        self.history.push(HistoryEntry {
            guess: played,
            feedback,
            from_oracle,
            candidates_before,
            candidates_after: self.session.candidate_count(),
        });
        self.input_buffer.clear();
        self.manual_guess = None;

        if state == SessionState::Solved {
            self.celebrate();
        } else {
            self.compute_suggestion();
            if self.current_guess.is_some() {
                let remaining = self.session.candidate_count();
                self.add_message(
                    &format!("{remaining} candidates remaining"),
                    MessageStyle::Info,
                );
            }
        }
    }

    fn celebrate(&mut self) {
        let guess_count = self.history.len();
        self.stats.games_won += 1;
        *self.stats.guess_distribution.entry(guess_count).or_insert(0) += 1;
        self.current_guess = None;
        self.input_mode = InputMode::WinCelebration;

        let celebration = match guess_count {
            1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
            2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
            3 => "✨ SPLENDID! Three guesses! ✨",
            4 => "👏 GREAT JOB! Four guesses! 👏",
            5 => "🎉 NICE WORK! Five guesses! 🎉",
            6 => "😅 PHEW! Got it in six! 😅",
            _ => "🎊 SOLVED! 🎊",
        };

        self.add_message(celebration, MessageStyle::Success);
        self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
    }

    pub fn new_game(&mut self) {
        self.session = SolverSession::with_oracle(
            self.session.pool().clone(),
            self.session.config().clone(),
            self.session.oracle(),
        );
        self.history.clear();
        self.current_guess = None;
        self.manual_guess = None;
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Feedback;
        self.add_message("New game started!", MessageStyle::Info);
        self.compute_suggestion();
    }

    /// Drop the last round by replaying the rest
    pub fn undo_last(&mut self) {
        let records = self.session.history();
        if records.is_empty() {
            self.add_message("Nothing to undo!", MessageStyle::Error);
            return;
        }

        let replayed = SolverSession::replay(
            self.session.pool().clone(),
            self.session.config().clone(),
            self.session.oracle(),
            &records[..records.len() - 1],
        );
        match replayed {
            Ok(session) => {
                self.session = session;
                self.history.pop();
                self.manual_guess = None;
                self.input_buffer.clear();
                self.input_mode = InputMode::Feedback;
                self.compute_suggestion();
                self.add_message("Undone!", MessageStyle::Info);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.session.pool().word_length()
    }

    /// Play the typed word instead of the suggestion this turn
    pub fn use_manual_word(&mut self) {
        let text = self.manual_word.clone();

        let word = match Word::with_length(text.as_str(), self.word_length()) {
            Ok(word) => word,
            Err(e) => {
                self.add_message(&format!("Invalid word: {e}"), MessageStyle::Error);
                return;
            }
        };

        let candidates: Vec<Word> = self.session.candidates().cloned().collect();
        let score = ranker::rank_guesses(std::slice::from_ref(&word), &candidates)
            .first()
            .map_or(0, |(_, score)| *score);

        if !self.session.pool().contains(&word) {
            self.add_message(
                &format!("Note: {} is not in the word list", text.to_uppercase()),
                MessageStyle::Info,
            );
        }
        self.add_message(
            &format!("Using: {} (coverage score {score})", text.to_uppercase()),
            MessageStyle::Success,
        );

        self.manual_guess = Some(text);
        self.input_mode = InputMode::Feedback;
        self.manual_word.clear();
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.input_mode {
            InputMode::WinCelebration => match key.code {
                KeyCode::Char('q') => self.quit(),
                KeyCode::Char('n') => self.new_game(),
                KeyCode::Char('u') => self.undo_last(),
                _ => {}
            },
            InputMode::Feedback => match key.code {
                KeyCode::Char('q') => self.quit(),
                KeyCode::Char('n') => self.new_game(),
                KeyCode::Char('u') => self.undo_last(),
                KeyCode::Tab => {
                    if self.session.candidate_count() > 0 {
                        self.input_mode = InputMode::ManualWord;
                        self.add_message(
                            &format!("Enter your own word ({} letters)", self.word_length()),
                            MessageStyle::Info,
                        );
                    }
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => {
                    let input = self.input_buffer.clone();
                    self.handle_feedback(&input);
                }
                _ => {}
            },
            InputMode::ManualWord => match key.code {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Feedback;
                    self.manual_word.clear();
                    self.add_message("Cancelled manual word entry", MessageStyle::Info);
                }
                KeyCode::Tab => {
                    self.input_mode = InputMode::Feedback;
                    self.manual_word.clear();
                }
                KeyCode::Char(c) => {
                    if self.manual_word.len() < self.word_length() && c.is_ascii_alphabetic() {
                        self.manual_word.push(c.to_ascii_lowercase());
                    }
                }
                KeyCode::Backspace => {
                    self.manual_word.pop();
                }
                KeyCode::Enter => {
                    if self.manual_word.len() == self.word_length() {
                        self.use_manual_word();
                    } else {
                        self.add_message(
                            &format!("Word must be exactly {} letters!", self.word_length()),
                            MessageStyle::Error,
                        );
                    }
                }
                _ => {}
            },
        }
    }

    fn quit(&mut self) {
        self.session.abandon();
        self.should_quit = true;
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    app.compute_suggestion();

    while !app.should_quit {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }

    Ok(())
}
