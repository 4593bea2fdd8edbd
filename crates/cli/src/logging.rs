//! Logging initialisation for the `unfold-zdd` CLI.
//!
//! Installs a global `tracing` subscriber, text or JSON depending on
//! `--log-format`, writing to stderr so the Result JSON on stdout stays
//! parseable. `RUST_LOG` controls the level filter when present; otherwise
//! `-v`/`--quiet` pick a default.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogFormat;

static INITIALISED: OnceLock<()> = OnceLock::new();

fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Install the global subscriber if it has not already been installed.
///
/// Idempotent: a second call (e.g. from a test harness driving `main`
/// more than once) is a silent no-op rather than a panic.
pub fn init_logging(format: LogFormat, verbose: u8, quiet: bool) {
    if INITIALISED.get().is_some() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    let result = match format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if let Err(source) = result {
        eprintln!("structured logging already configured elsewhere: {source}");
    }
    let _ = INITIALISED.set(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_tightens_with_quiet_and_loosens_with_verbose() {
        assert_eq!(default_level(0, true), "warn");
        assert_eq!(default_level(0, false), "info");
        assert_eq!(default_level(1, false), "debug");
        assert_eq!(default_level(2, false), "trace");
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LogFormat::Text, 0, false);
        init_logging(LogFormat::Text, 0, false);
    }
}
