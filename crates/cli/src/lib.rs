//! Library surface of the `unfold-zdd` binary: argument parsing, logging
//! setup, and the phase-by-phase driver, split out so integration tests
//! can exercise them without spawning a subprocess.

pub mod cli;
pub mod driver;
pub mod error;
pub mod logging;

pub use cli::Cli;
pub use error::CliError;
