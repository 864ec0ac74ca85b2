//! Command implementations

pub mod benchmark;
pub mod candidates;
pub mod simple;
pub mod solve;

pub use benchmark::{BenchmarkResult, BenchmarkSetup, run_benchmark, sample_targets};
pub use candidates::{CandidatesReport, list_candidates, parse_round};
pub use simple::run_simple;
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_word};
