//! Hybrid Wordle Solver - CLI
//!
//! Constraint filtering and letter-coverage ranking, optionally steered by a
//! language-model oracle. TUI and line-based modes, plus simulation tools.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use wordle_hybrid::{
    commands::{
        BenchmarkSetup, SolveConfig, list_candidates, run_benchmark, run_simple, sample_targets,
        solve_word,
    },
    config::{DEFAULT_ORACLE_ENDPOINT, DEFAULT_ORACLE_MODEL, OracleConfig, SessionConfig},
    logging,
    oracle::{ChatOracle, Language, NoOracle, Oracle},
    output::{print_benchmark_result, print_candidates_report, print_solve_result},
    solver::SolverSession,
    wordlists::{EMBEDDED_WORD_LENGTH, WordPool, loader::load_pool},
};

#[derive(Parser)]
#[command(
    name = "wordle_hybrid",
    about = "Wordle solver combining constraint filtering with an optional LLM oracle",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'embedded' (default) or comma-separated paths to files
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Word length
    #[arg(short = 'l', long, global = true, default_value_t = EMBEDDED_WORD_LENGTH)]
    length: usize,

    /// Language the oracle should propose words in
    #[arg(long, global = true, value_enum, default_value_t = Language::En)]
    language: Language,

    /// Cap on candidates kept after filtering
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Ranked candidates sent to the oracle
    #[arg(long, global = true, default_value_t = 50)]
    top_n: usize,

    /// Ask the oracle for each guess (needs an API key)
    #[arg(long, global = true)]
    oracle: bool,

    /// API key for the oracle
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenAI-compatible chat completions endpoint
    #[arg(
        long,
        global = true,
        env = "WORDLE_ORACLE_ENDPOINT",
        default_value = DEFAULT_ORACLE_ENDPOINT
    )]
    oracle_endpoint: String,

    /// Model the oracle asks
    #[arg(
        long,
        global = true,
        env = "WORDLE_ORACLE_MODEL",
        default_value = DEFAULT_ORACLE_MODEL
    )]
    oracle_model: String,

    /// Seconds to wait for the oracle before falling back to ranking
    #[arg(long, global = true, default_value_t = 10)]
    oracle_timeout: u64,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (interactive solver without TUI)
    Simple,

    /// Solve a specific target word
    Solve {
        /// The target word to solve
        word: String,

        /// Maximum number of guesses
        #[arg(short, long, default_value_t = 6)]
        max_guesses: usize,
    },

    /// Benchmark solver performance on random targets
    Benchmark {
        /// Number of random words to test
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Seed for reproducible target selection
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum number of guesses per game
        #[arg(short, long, default_value_t = 6)]
        max_guesses: usize,
    },

    /// List the candidates left after some rounds
    Candidates {
        /// Rounds as guess:pattern, e.g. crane:GY-G-
        #[arg(short, long = "round")]
        rounds: Vec<String>,

        /// Number of ranked candidates to show
        #[arg(short, long, default_value_t = 20)]
        top: usize,
    },
}

/// Load the word pool named by `-w`
///
/// - "embedded": the built-in English list
/// - "a.txt,b.txt": words of the requested length from each file, in order
fn load_wordlist(wordlist: &str, length: usize) -> Result<WordPool> {
    let pool = if wordlist == "embedded" {
        if length != EMBEDDED_WORD_LENGTH {
            bail!(
                "the embedded list only has {EMBEDDED_WORD_LENGTH}-letter words; \
                 pass --wordlist for length {length}"
            );
        }
        WordPool::embedded()
    } else {
        let paths: Vec<&str> = wordlist
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        load_pool(&paths, length).with_context(|| format!("failed to load wordlist '{wordlist}'"))?
    };

    if pool.is_empty() {
        bail!("wordlist '{wordlist}' has no {length}-letter words");
    }
    Ok(pool)
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            candidate_limit: self.limit,
            oracle_top_n: self.top_n,
            oracle_timeout: Duration::from_secs(self.oracle_timeout),
            language: self.language,
        }
    }

    /// The chat oracle when asked for and configured, otherwise none
    fn build_oracle(&self) -> Result<Arc<dyn Oracle>> {
        if !self.oracle {
            return Ok(Arc::new(NoOracle));
        }
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.is_empty()) else {
            warn!("--oracle given without an API key, using ranking only");
            return Ok(Arc::new(NoOracle));
        };

        let config = OracleConfig::new(api_key)
            .with_endpoint(self.oracle_endpoint.as_str())
            .with_model(self.oracle_model.as_str());
        info!(endpoint = %config.endpoint, model = %config.model, "oracle enabled");
        let oracle = ChatOracle::new(config).context("failed to build oracle client")?;
        Ok(Arc::new(oracle))
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);
    logging::init(cli.verbose, matches!(command, Commands::Play));

    let pool = load_wordlist(&cli.wordlist, cli.length)?;
    info!(words = pool.len(), length = pool.word_length(), "wordlist ready");

    let config = cli.session_config();
    let oracle = cli.build_oracle()?;

    match command {
        Commands::Play => run_play_command(pool, config, oracle),
        Commands::Simple => {
            let session = SolverSession::with_oracle(pool, config, oracle);
            run_simple(session, io::stdin().lock(), &mut io::stdout().lock())
        }
        Commands::Solve { word, max_guesses } => {
            let session = SolverSession::with_oracle(pool, config, oracle);
            let mut solve = SolveConfig::new(word);
            solve.max_guesses = max_guesses;
            let result = solve_word(solve, session)?;
            print_solve_result(&result, cli.verbose > 0 || cli.oracle);
            Ok(())
        }
        Commands::Benchmark {
            count,
            seed,
            max_guesses,
        } => {
            println!("Running benchmark on {count} random words...");
            let targets = sample_targets(&pool, count, seed);
            let setup = BenchmarkSetup {
                pool,
                config,
                oracle,
                max_guesses,
                show_progress: true,
            };
            let result = run_benchmark(&setup, &targets)?;
            print_benchmark_result(&result);
            Ok(())
        }
        Commands::Candidates { rounds, top } => {
            let session = SolverSession::with_oracle(pool, config, oracle);
            let report = list_candidates(session, &rounds, top)?;
            print_candidates_report(&report);
            Ok(())
        }
    }
}

fn run_play_command(pool: WordPool, config: SessionConfig, oracle: Arc<dyn Oracle>) -> Result<()> {
    use wordle_hybrid::interactive::{App, run_tui};

    let app = App::new(SolverSession::with_oracle(pool, config, oracle));
    run_tui(app)
}
