//! Benchmark command
//!
//! Plays one independent session per target word, in parallel, and
//! summarizes how many guesses each game took.

use super::solve::{SolveConfig, solve_word};
use crate::config::SessionConfig;
use crate::core::Word;
use crate::oracle::Oracle;
use crate::solver::SolverSession;
use crate::wordlists::WordPool;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_words: usize,
    pub solved: usize,
    /// Targets not found within the guess limit (or exhausted)
    pub failures: Vec<String>,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Guess count of each solved game
    pub distribution: BTreeMap<usize, usize>,
    pub oracle_guesses: usize,
    pub duration: Duration,
    pub words_per_second: f64,
}

/// Pick `count` distinct targets from the pool
///
/// With a seed the sample is reproducible.
#[must_use]
pub fn sample_targets(pool: &WordPool, count: usize, seed: Option<u64>) -> Vec<Word> {
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    pool.words()
        .choose_multiple(&mut rng, count)
        .cloned()
        .collect()
}

/// Everything a benchmark needs to start sessions
pub struct BenchmarkSetup {
    pub pool: WordPool,
    pub config: SessionConfig,
    pub oracle: Arc<dyn Oracle>,
    pub max_guesses: usize,
    pub show_progress: bool,
}

/// Solve every target in its own session
///
/// # Errors
///
/// Returns the first error any game produced.
pub fn run_benchmark(setup: &BenchmarkSetup, targets: &[Word]) -> Result<BenchmarkResult> {
    let progress = if setup.show_progress {
        let pb = ProgressBar::new(targets.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();

    let outcomes: Vec<(String, Option<usize>, usize)> = targets
        .par_iter()
        .map(|target| -> Result<(String, Option<usize>, usize)> {
            let session = SolverSession::with_oracle(
                setup.pool.clone(),
                setup.config.clone(),
                Arc::clone(&setup.oracle),
            );
            let config = SolveConfig {
                target: target.text().to_string(),
                max_guesses: setup.max_guesses,
            };
            let result = solve_word(config, session)?;
            let oracle_guesses = result
                .guesses
                .iter()
                .filter(|step| step.source.is_oracle())
                .count();

            progress.set_message(target.text().to_string());
            progress.inc(1);

            let guesses = result.success.then_some(result.guesses.len());
            Ok((result.target, guesses, oracle_guesses))
        })
        .collect::<Result<_>>()?;

    progress.finish_and_clear();
    let duration = start.elapsed();

    let mut distribution = BTreeMap::new();
    let mut failures = Vec::new();
    let mut total_guesses = 0;
    let mut oracle_guesses = 0;

    for (target, guesses, from_oracle) in outcomes {
        oracle_guesses += from_oracle;
        match guesses {
            Some(count) => {
                total_guesses += count;
                *distribution.entry(count).or_insert(0) += 1;
            }
            None => failures.push(target),
        }
    }

    let total_words = targets.len();
    let solved = total_words - failures.len();

    Ok(BenchmarkResult {
        total_words,
        solved,
        failures,
        total_guesses,
        average_guesses: if solved == 0 {
            0.0
        } else {
            total_guesses as f64 / solved as f64
        },
        min_guesses: distribution.keys().next().copied().unwrap_or(0),
        max_guesses: distribution.keys().next_back().copied().unwrap_or(0),
        distribution,
        oracle_guesses,
        duration,
        words_per_second: if duration.is_zero() {
            0.0
        } else {
            total_words as f64 / duration.as_secs_f64()
        },
    })
}
