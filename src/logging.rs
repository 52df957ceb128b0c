//! Tracing subscriber setup for the command-line binary.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default level for a given number of `-v` flags.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a global subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level comes from `verbosity`.
/// Returns `false` if a subscriber was already installed.
pub fn init(verbosity: u8) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok()
}
