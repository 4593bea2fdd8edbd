//! Fixed-width bit masks, decimal big integers and shared error plumbing.
//!
//! These are the load-bearing primitives used throughout the workspace: the
//! ZDD engine's filter specifications are generic over [`BitMask`], and
//! cardinalities that may run past 2^64 are carried around as
//! [`bigint::Decimal`] strings rather than pulling in a bignum crate.

pub mod bigint;
pub mod bitmask;
pub mod error;

pub use bigint::Decimal;
pub use bitmask::{
    with_bitmask, BitMask, Mask, Mask128, Mask192, Mask256, Mask320, Mask384, Mask448, Mask64,
    WidthClass,
};
pub use error::CoreError;
