//! Hybrid Wordle Solver
//!
//! Narrows a dictionary round by round from positional and occurrence
//! feedback, ranks the survivors by letter coverage, and can hand the short
//! list to a language-model oracle for the final pick.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_hybrid::config::SessionConfig;
//! use wordle_hybrid::core::{Word, generate};
//! use wordle_hybrid::solver::{NextGuess, SolverSession};
//! use wordle_hybrid::wordlists::WordPool;
//!
//! let pool = WordPool::from_strs(5, &["crane", "slate", "plate"]).unwrap();
//! let mut session = SolverSession::new(pool, SessionConfig::default());
//!
//! let target = Word::new("plate").unwrap();
//! if let NextGuess::Guess(suggestion) = session.next_guess().unwrap() {
//!     let guess = Word::new(suggestion.word).unwrap();
//!     let feedback = generate(&guess, &target).unwrap();
//!     session.submit_feedback(&guess, &feedback).unwrap();
//! }
//! assert_eq!(session.candidate_count(), 1);
//! ```

// Core domain types
pub mod core;

// Constraint model, filtering, ranking and sessions
pub mod solver;

// Suggestion oracles
pub mod oracle;

// Word lists
pub mod wordlists;

// Session and oracle settings
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Tracing subscriber setup
pub mod logging;
