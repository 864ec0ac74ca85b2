//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. Output is compact and written to stderr so it never mixes with the
//! solver's own stdout.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `verbosity`. With `tui` set, nothing is logged
/// unless `RUST_LOG` asks for it, since stderr shares the terminal with the
/// interface. Subsequent calls are no-ops.
pub fn init(verbosity: u8, tui: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if tui => return,
        Err(_) => EnvFilter::new(level_for(verbosity)),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails only if a subscriber is already installed
    let _ = subscriber.try_init();
}
