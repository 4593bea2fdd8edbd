use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors surfaced at the CLI boundary: every lower-level error taxonomy
/// (I/O parsing, bit-mask capacity, Burnside) is folded into one of these
/// cases via `.change_context`, so [`crate::driver::run`] has a single
/// error type to map to an exit code (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    /// Reading or validating one of the three input artifacts failed
    /// (§7 item 1).
    Input,
    /// `E` exceeded every configured [`unfold_zdd_core::WidthClass`]
    /// (§7 item 2).
    Capacity,
    /// The Burnside aggregator rejected an empty automorphism list.
    EmptyAutomorphismGroup,
    /// Writing the Result JSON failed.
    ResultWrite,
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input => write!(f, "failed to read or validate an input artifact"),
            Self::Capacity => write!(f, "graph is too large for every configured bit-mask width"),
            Self::EmptyAutomorphismGroup => {
                write!(f, "automorphism list is empty; Burnside's lemma needs at least the identity")
            }
            Self::ResultWrite => write!(f, "failed to write the result"),
        }
    }
}

impl Context for CliError {}
