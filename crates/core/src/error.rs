use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors intrinsic to the core primitives (bit masks, decimal arithmetic).
///
/// A small `Debug + Display` type that only implements [`Context`],
/// leaving propagation and attachments to `error_stack::Report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// No configured [`BitMask`] width covers the requested number of bits.
    ///
    /// [`BitMask`]: crate::BitMask
    UnsupportedWidth {
        /// The number of bits that was requested (typically `|E|`).
        requested: usize,
        /// The largest width this build was compiled with.
        largest_available: usize,
    },
    /// A decimal string passed to [`bigint`](crate::bigint) was not a
    /// well-formed non-negative integer.
    MalformedDecimal,
    /// Division by zero was requested in [`bigint::divmod_small`](crate::bigint::divmod_small).
    DivisionByZero,
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedWidth {
                requested,
                largest_available,
            } => write!(
                f,
                "no bit-mask width covers {requested} bits (largest configured width is \
                 {largest_available} bits); add a wider BitMask case"
            ),
            Self::MalformedDecimal => write!(f, "malformed decimal string"),
            Self::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl Context for CoreError {}
