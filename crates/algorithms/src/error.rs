use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors raised by the Burnside aggregator.
///
/// Sum-not-divisible-by-group-order is not a variant here: `finalize`
/// floor-divides and reports that condition through
/// `BurnsideResult::divisible` instead of erroring, so the CLI can still
/// print the quotient and pick a non-zero exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnsideError {
    /// The automorphism list was empty; Burnside's lemma needs at least
    /// the identity.
    EmptyGroup,
}

impl Display for BurnsideError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyGroup => write!(f, "automorphism list is empty"),
        }
    }
}

impl Context for BurnsideError {}
