//! Per-game orchestration
//!
//! A session owns the constraint model and the guess history for one game
//! and borrows a shared word pool. Each round runs update, filter and rank;
//! `next_guess` then asks the oracle (if any) and falls back to the best
//! ranked candidate.

use super::{ConstraintModel, filter, ranker};
use crate::config::SessionConfig;
use crate::core::{FeedbackInput, LetterStatus, SolverError, Word, is_solved};
use crate::oracle::{NoOracle, Oracle, OracleError, OracleRequest, OracleSuggestion};
use crate::wordlists::WordPool;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use tracing::{debug, warn};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingFirstGuess,
    InProgress,
    Solved,
    /// No candidate is consistent with the feedback
    Exhausted,
    Abandoned,
}

impl SessionState {
    /// True once the session accepts no further rounds
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Exhausted | Self::Abandoned)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingFirstGuess => "awaiting first guess",
            Self::InProgress => "in progress",
            Self::Solved => "solved",
            Self::Exhausted => "exhausted",
            Self::Abandoned => "abandoned",
        };
        f.write_str(name)
    }
}

/// One played round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessRecord {
    guess: Word,
    feedback: Vec<LetterStatus>,
}

impl GuessRecord {
    #[must_use]
    pub const fn new(guess: Word, feedback: Vec<LetterStatus>) -> Self {
        Self { guess, feedback }
    }

    #[must_use]
    pub const fn guess(&self) -> &Word {
        &self.guess
    }

    #[must_use]
    pub fn feedback(&self) -> &[LetterStatus] {
        &self.feedback
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        is_solved(&self.feedback)
    }
}

/// Who picked a suggested word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GuessSource {
    Oracle { explanation: String },
    Ranked { score: usize },
}

impl GuessSource {
    #[must_use]
    pub const fn is_oracle(&self) -> bool {
        matches!(self, Self::Oracle { .. })
    }
}

impl fmt::Display for GuessSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oracle { .. } => f.write_str("oracle"),
            Self::Ranked { score } => write!(f, "ranked, score {score}"),
        }
    }
}

/// The next word to play
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub word: String,
    pub source: GuessSource,
    /// Candidates still consistent with the feedback
    pub candidate_count: usize,
}

/// Outcome of [`SolverSession::next_guess`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextGuess {
    Guess(Suggestion),
    /// Nothing in the pool fits the feedback
    NoSolution,
    /// The game is already won
    Solved { answer: Word },
}

/// State of one game
pub struct SolverSession {
    pool: WordPool,
    config: SessionConfig,
    oracle: Arc<dyn Oracle>,
    model: ConstraintModel,
    history: Vec<GuessRecord>,
    ranked: Vec<(Word, usize)>,
    state: SessionState,
}

impl SolverSession {
    /// Start a game without an oracle
    #[must_use]
    pub fn new(pool: WordPool, config: SessionConfig) -> Self {
        Self::with_oracle(pool, config, Arc::new(NoOracle))
    }

    /// Start a game that consults `oracle` for each guess
    #[must_use]
    pub fn with_oracle(pool: WordPool, config: SessionConfig, oracle: Arc<dyn Oracle>) -> Self {
        let model = ConstraintModel::new(pool.word_length());
        let mut session = Self {
            pool,
            config,
            oracle,
            model,
            history: Vec::new(),
            ranked: Vec::new(),
            state: SessionState::AwaitingFirstGuess,
        };
        session.refresh();
        session
    }

    /// Rebuild a session by playing `records` in order
    ///
    /// Used to undo rounds: replay the history without its last entry.
    ///
    /// # Errors
    /// Any error a record would raise from [`SolverSession::submit_feedback`].
    pub fn replay(
        pool: WordPool,
        config: SessionConfig,
        oracle: Arc<dyn Oracle>,
        records: &[GuessRecord],
    ) -> Result<Self, SolverError> {
        let mut session = Self::with_oracle(pool, config, oracle);
        for record in records {
            session.submit_feedback(record.guess(), record.feedback())?;
        }
        Ok(session)
    }

    /// Record the feedback a guess received
    ///
    /// Returns the new state. A rejected round changes nothing.
    ///
    /// # Errors
    /// - `SessionFinished` once the session is solved, exhausted or abandoned
    /// - `LengthMismatch` or `Conflict` from the constraint update
    pub fn submit_feedback(
        &mut self,
        guess: &Word,
        feedback: &[LetterStatus],
    ) -> Result<SessionState, SolverError> {
        if self.state.is_terminal() {
            return Err(SolverError::SessionFinished { state: self.state });
        }

        self.model.update(guess, feedback)?;
        self.history
            .push(GuessRecord::new(guess.clone(), feedback.to_vec()));
        self.refresh();

        self.state = if is_solved(feedback) {
            SessionState::Solved
        } else {
            SessionState::InProgress
        };

        debug!(
            round = self.history.len(),
            guess = %guess,
            candidates = self.ranked.len(),
            state = %self.state,
            "feedback applied"
        );
        Ok(self.state)
    }

    /// Normalize round input and record it
    ///
    /// # Errors
    /// `MalformedFeedback` or `LengthMismatch` from normalization, then
    /// anything [`SolverSession::submit_feedback`] returns.
    pub fn submit_input(
        &mut self,
        guess: &Word,
        input: &FeedbackInput,
    ) -> Result<SessionState, SolverError> {
        if self.state.is_terminal() {
            return Err(SolverError::SessionFinished { state: self.state });
        }
        let feedback = input.normalize(guess)?;
        self.submit_feedback(guess, &feedback)
    }

    /// Pick the next word to play
    ///
    /// An empty candidate list moves the session to `Exhausted` and yields
    /// `NoSolution`; no guess is invented. The oracle's word is used as-is.
    /// Oracle errors and answers slower than `oracle_timeout` fall back to
    /// the top-ranked candidate; the round never waits past the timeout.
    ///
    /// # Errors
    /// `SessionFinished` if the session was abandoned.
    pub fn next_guess(&mut self) -> Result<NextGuess, SolverError> {
        match self.state {
            SessionState::Abandoned => {
                return Err(SolverError::SessionFinished { state: self.state });
            }
            SessionState::Exhausted => return Ok(NextGuess::NoSolution),
            SessionState::Solved => {
                if let Some(last) = self.history.last() {
                    return Ok(NextGuess::Solved {
                        answer: last.guess().clone(),
                    });
                }
            }
            SessionState::AwaitingFirstGuess | SessionState::InProgress => {}
        }

        let Some((best, score)) = self.ranked.first() else {
            self.state = SessionState::Exhausted;
            debug!(round = self.history.len(), "no candidates left");
            return Ok(NextGuess::NoSolution);
        };

        let candidate_count = self.ranked.len();
        match self.consult_oracle() {
            Ok(suggestion) => {
                debug!(word = %suggestion.word, "using oracle suggestion");
                return Ok(NextGuess::Guess(Suggestion {
                    word: suggestion.word,
                    source: GuessSource::Oracle {
                        explanation: suggestion.explanation,
                    },
                    candidate_count,
                }));
            }
            Err(OracleError::Unavailable) => {}
            Err(error) => warn!(%error, "oracle failed, using ranking"),
        }

        Ok(NextGuess::Guess(Suggestion {
            word: best.text().to_string(),
            source: GuessSource::Ranked { score: *score },
            candidate_count,
        }))
    }

    /// Ask the oracle on a worker thread, waiting at most `oracle_timeout`
    ///
    /// A worker that misses the deadline is left to finish on its own; its
    /// answer is dropped.
    fn consult_oracle(&self) -> Result<OracleSuggestion, OracleError> {
        if !self.oracle.is_enabled() {
            return Err(OracleError::Unavailable);
        }

        let timeout = self.config.oracle_timeout;
        let top: Vec<String> = self
            .ranked
            .iter()
            .take(self.config.oracle_top_n)
            .map(|(word, _)| word.text().to_string())
            .collect();
        let summary = self.model.summary();
        let history = self.history.clone();
        let language = self.config.language;
        let word_length = self.pool.word_length();
        let oracle = Arc::clone(&self.oracle);

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("oracle".to_string())
            .spawn(move || {
                let request = OracleRequest {
                    candidates: &top,
                    constraints: &summary,
                    history: &history,
                    language,
                    word_length,
                    timeout,
                };
                // the receiver is gone once the deadline has passed
                let _ = tx.send(oracle.suggest(&request));
            })
            .map_err(|e| OracleError::Transport(format!("cannot start oracle worker: {e}")))?;

        match rx.recv_timeout(timeout) {
            Ok(answer) => answer,
            Err(RecvTimeoutError::Timeout) => Err(OracleError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(OracleError::Transport(
                "oracle worker stopped without answering".to_string(),
            )),
        }
    }

    /// End the game early
    ///
    /// Has no effect on a session that already finished.
    pub fn abandon(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Abandoned;
            debug!(rounds = self.history.len(), "session abandoned");
        }
    }

    fn refresh(&mut self) {
        let survivors = filter::apply(
            self.pool.words(),
            &self.model,
            self.config.candidate_limit,
        );
        self.ranked = ranker::rank_scored(&survivors);
    }

    /// Ranked candidates with scores, best first
    #[must_use]
    pub fn ranked(&self) -> &[(Word, usize)] {
        &self.ranked
    }

    /// Candidates in ranked order
    pub fn candidates(&self) -> impl Iterator<Item = &Word> {
        self.ranked.iter().map(|(word, _)| word)
    }

    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.ranked.len()
    }

    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    #[must_use]
    pub const fn model(&self) -> &ConstraintModel {
        &self.model
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn pool(&self) -> &WordPool {
        &self.pool
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The oracle this session consults, for rebuilding it
    #[must_use]
    pub fn oracle(&self) -> Arc<dyn Oracle> {
        Arc::clone(&self.oracle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Conflict, generate, parse_statuses};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    const WORDS: &[&str] = &[
        "crane", "slate", "irate", "crate", "grate", "plate", "apple", "ample", "speed", "sheep",
    ];

    fn pool() -> WordPool {
        WordPool::from_strs(5, WORDS).unwrap()
    }

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn play(session: &mut SolverSession, guess: &str, target: &str) -> SessionState {
        let guess = word(guess);
        let feedback = generate(&guess, &word(target)).unwrap();
        session.submit_feedback(&guess, &feedback).unwrap()
    }

    fn suggested(session: &mut SolverSession) -> Suggestion {
        match session.next_guess().unwrap() {
            NextGuess::Guess(suggestion) => suggestion,
            other => panic!("expected a guess, got {other:?}"),
        }
    }

    struct FixedOracle(Result<OracleSuggestion, OracleError>);

    impl Oracle for FixedOracle {
        fn suggest(&self, _request: &OracleRequest<'_>) -> Result<OracleSuggestion, OracleError> {
            self.0.clone()
        }
    }

    struct SlowOracle(Duration);

    impl Oracle for SlowOracle {
        fn suggest(&self, _request: &OracleRequest<'_>) -> Result<OracleSuggestion, OracleError> {
            std::thread::sleep(self.0);
            Ok(OracleSuggestion {
                word: "plate".to_string(),
                explanation: "late".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingOracle {
        seen: Mutex<Vec<(Vec<String>, usize)>>,
    }

    impl Oracle for RecordingOracle {
        fn suggest(&self, request: &OracleRequest<'_>) -> Result<OracleSuggestion, OracleError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((request.candidates.to_vec(), request.history.len()));
            }
            Err(OracleError::Transport("offline".to_string()))
        }
    }

    fn oracle_word(word: &str) -> Arc<dyn Oracle> {
        Arc::new(FixedOracle(Ok(OracleSuggestion {
            word: word.to_string(),
            explanation: "because".to_string(),
        })))
    }

    #[test]
    fn fresh_session_ranks_whole_pool() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        assert_eq!(session.state(), SessionState::AwaitingFirstGuess);
        assert_eq!(session.candidate_count(), WORDS.len());

        let suggestion = suggested(&mut session);
        assert_eq!(suggestion.word, session.ranked()[0].0.text());
        assert_eq!(suggestion.candidate_count, WORDS.len());
        assert!(!suggestion.source.is_oracle());
    }

    #[test]
    fn feedback_narrows_candidates() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        let state = play(&mut session, "crane", "plate");

        assert_eq!(state, SessionState::InProgress);
        assert_eq!(session.history().len(), 1);
        assert!(session.candidates().any(|w| w.text() == "plate"));
        assert!(session.candidates().all(|w| w.text() != "crane"));
        assert!(session.candidate_count() < WORDS.len());
    }

    #[test]
    fn all_correct_solves_and_closes_session() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        play(&mut session, "crane", "slate");
        assert_eq!(play(&mut session, "slate", "slate"), SessionState::Solved);

        assert_eq!(
            session.next_guess().unwrap(),
            NextGuess::Solved {
                answer: word("slate")
            }
        );

        let err = session
            .submit_feedback(&word("plate"), &parse_statuses("-GGGG").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            SolverError::SessionFinished {
                state: SessionState::Solved
            }
        );
    }

    #[test]
    fn missing_letter_exhausts_session() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        session
            .submit_feedback(&word("zesty"), &parse_statuses("Y----").unwrap())
            .unwrap();

        assert_eq!(session.candidate_count(), 0);
        assert_eq!(session.next_guess().unwrap(), NextGuess::NoSolution);
        assert_eq!(session.state(), SessionState::Exhausted);
        assert!(matches!(
            session.submit_feedback(&word("crane"), &parse_statuses("-----").unwrap()),
            Err(SolverError::SessionFinished {
                state: SessionState::Exhausted
            })
        ));
    }

    #[test]
    fn conflict_leaves_session_untouched() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        play(&mut session, "crane", "crate");
        let before = session.candidate_count();

        let err = session
            .submit_feedback(&word("slate"), &parse_statuses("GGGGG").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::Conflict(Conflict::FixedMismatch { position: 0, .. })
        ));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.candidate_count(), before);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        let err = session
            .submit_input(&word("crane"), &FeedbackInput::from("GQ---"))
            .unwrap_err();
        assert!(matches!(err, SolverError::MalformedFeedback(_)));
        assert_eq!(session.state(), SessionState::AwaitingFirstGuess);

        let err = session
            .submit_input(&word("crane"), &FeedbackInput::from("G--"))
            .unwrap_err();
        assert!(matches!(err, SolverError::LengthMismatch { .. }));
    }

    #[test]
    fn abandoned_session_refuses_guesses() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        session.abandon();
        assert_eq!(session.state(), SessionState::Abandoned);
        assert_eq!(
            session.next_guess(),
            Err(SolverError::SessionFinished {
                state: SessionState::Abandoned
            })
        );
    }

    #[test]
    fn oracle_word_used_verbatim() {
        let mut session =
            SolverSession::with_oracle(pool(), SessionConfig::default(), oracle_word("fjord"));
        let suggestion = suggested(&mut session);

        assert_eq!(suggestion.word, "fjord");
        assert_eq!(
            suggestion.source,
            GuessSource::Oracle {
                explanation: "because".to_string()
            }
        );
    }

    #[test]
    fn oracle_failure_falls_back_to_ranking() {
        let oracle: Arc<dyn Oracle> = Arc::new(FixedOracle(Err(OracleError::Status {
            status: 503,
            body: String::new(),
        })));
        let mut session = SolverSession::with_oracle(pool(), SessionConfig::default(), oracle);
        let suggestion = suggested(&mut session);

        assert_eq!(suggestion.word, session.ranked()[0].0.text());
        assert!(matches!(suggestion.source, GuessSource::Ranked { .. }));
    }

    #[test]
    fn late_oracle_answer_is_discarded() {
        let config = SessionConfig {
            oracle_timeout: Duration::from_millis(10),
            ..SessionConfig::default()
        };
        let oracle: Arc<dyn Oracle> = Arc::new(SlowOracle(Duration::from_millis(60)));
        let mut session = SolverSession::with_oracle(pool(), config, oracle);

        let suggestion = suggested(&mut session);
        assert!(!suggestion.source.is_oracle());
    }

    #[test]
    fn hanging_oracle_does_not_stall_round() {
        let config = SessionConfig {
            oracle_timeout: Duration::from_millis(50),
            ..SessionConfig::default()
        };
        let oracle: Arc<dyn Oracle> = Arc::new(SlowOracle(Duration::from_secs(3)));
        let mut session = SolverSession::with_oracle(pool(), config, oracle);

        let started = Instant::now();
        let suggestion = suggested(&mut session);
        let elapsed = started.elapsed();

        assert!(
            elapsed < Duration::from_secs(1),
            "next_guess waited {elapsed:?} with a 50ms timeout"
        );
        assert_eq!(suggestion.word, session.ranked()[0].0.text());
        assert!(!suggestion.source.is_oracle());
    }

    struct PanickingOracle;

    impl Oracle for PanickingOracle {
        fn suggest(&self, _request: &OracleRequest<'_>) -> Result<OracleSuggestion, OracleError> {
            panic!("oracle bug");
        }
    }

    #[test]
    fn panicking_oracle_falls_back_to_ranking() {
        let mut session =
            SolverSession::with_oracle(pool(), SessionConfig::default(), Arc::new(PanickingOracle));
        let suggestion = suggested(&mut session);
        assert!(!suggestion.source.is_oracle());
    }

    #[test]
    fn oracle_sees_top_n_and_history() {
        let recorder = Arc::new(RecordingOracle::default());
        let config = SessionConfig {
            oracle_top_n: 2,
            ..SessionConfig::default()
        };
        let mut session = SolverSession::with_oracle(pool(), config, recorder.clone());
        play(&mut session, "crane", "plate");
        suggested(&mut session);

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (candidates, history_len) = &seen[0];
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], session.ranked()[0].0.text());
        assert_eq!(*history_len, 1);
    }

    #[test]
    fn no_oracle_call_once_exhausted() {
        let recorder = Arc::new(RecordingOracle::default());
        let mut session =
            SolverSession::with_oracle(pool(), SessionConfig::default(), recorder.clone());
        session
            .submit_feedback(&word("zesty"), &parse_statuses("Y----").unwrap())
            .unwrap();

        assert_eq!(session.next_guess().unwrap(), NextGuess::NoSolution);
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn candidate_limit_caps_survivors() {
        let config = SessionConfig {
            candidate_limit: Some(3),
            ..SessionConfig::default()
        };
        let session = SolverSession::new(pool(), config);
        assert_eq!(session.candidate_count(), 3);
    }

    #[test]
    fn replay_matches_live_play() {
        let mut live = SolverSession::new(pool(), SessionConfig::default());
        play(&mut live, "crane", "apple");
        play(&mut live, "slate", "apple");

        let replayed = SolverSession::replay(
            pool(),
            SessionConfig::default(),
            live.oracle(),
            live.history(),
        )
        .unwrap();

        assert_eq!(replayed.model(), live.model());
        assert_eq!(replayed.ranked(), live.ranked());
        assert_eq!(replayed.state(), live.state());

        // undo: drop the last round
        let undone = SolverSession::replay(
            pool(),
            SessionConfig::default(),
            live.oracle(),
            &live.history()[..1],
        )
        .unwrap();
        assert_eq!(undone.history().len(), 1);
        assert!(undone.candidate_count() >= live.candidate_count());
    }

    #[test]
    fn wrong_length_guess_rejected() {
        let mut session = SolverSession::new(pool(), SessionConfig::default());
        assert_eq!(
            session.submit_feedback(&word("cranes"), &parse_statuses("------").unwrap()),
            Err(SolverError::LengthMismatch {
                expected: 5,
                actual: 6
            })
        );
    }
}
