//! Arbitrary-width unsigned bit masks.
//!
//! [`BitMask`] is the capability set the ZDD filter specifications (the
//! overlap filter and the symmetry filter) are generic over: zero, a
//! singleton `bit(i)`, in-place OR/AND, a fresh NOT, a pure AND, equality and
//! a zero test. [`Mask`] is the only implementation: a fixed number of `u64`
//! limbs chosen at compile time. [`WidthClass`] plus the [`with_bitmask`]
//! macro perform the runtime-to-compile-time dispatch described in the
//! design: pick the smallest width >= `|E|` and monomorphize the rest of the
//! pipeline over it.

use crate::error::CoreError;

/// The bit-vector capability the ZDD filter specifications are generic over.
///
/// All operations are total: there is no failure mode, matching the
/// "ordinary two's-complement bit operations on an unbounded positive
/// integer restricted to `N*64` bits" contract.
pub trait BitMask: Copy + Clone + PartialEq + Eq + core::fmt::Debug {
    /// Total number of representable bits.
    const BITS: usize;

    /// The zero mask.
    fn zero() -> Self;

    /// A mask with exactly bit `i` set, or the zero mask if `i >= Self::BITS`.
    fn bit(i: usize) -> Self;

    /// `self |= other`, limb-wise.
    fn or_assign(&mut self, other: &Self);

    /// `self &= other`, limb-wise.
    fn and_assign(&mut self, other: &Self);

    /// A fresh mask with every limb bitwise-negated.
    fn not(&self) -> Self;

    /// A fresh mask holding the limb-wise AND of `self` and `other`.
    fn and(&self, other: &Self) -> Self;

    /// `true` iff every limb is zero.
    fn is_zero(&self) -> bool;
}

/// A fixed-width bit mask backed by `LIMBS` 64-bit limbs (`LIMBS * 64` bits).
///
/// `LIMBS` is always chosen so the limbs exactly cover the configured
/// widths (64, 128, …), so [`BitMask::not`] never needs to mask off
/// high bits of a partial top limb.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Mask<const LIMBS: usize>([u64; LIMBS]);

impl<const LIMBS: usize> BitMask for Mask<LIMBS> {
    const BITS: usize = LIMBS * 64;

    fn zero() -> Self {
        Self([0; LIMBS])
    }

    fn bit(i: usize) -> Self {
        let mut limbs = [0u64; LIMBS];
        if i < Self::BITS {
            limbs[i / 64] = 1u64 << (i % 64);
        }
        Self(limbs)
    }

    fn or_assign(&mut self, other: &Self) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a |= *b;
        }
    }

    fn and_assign(&mut self, other: &Self) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a &= *b;
        }
    }

    fn not(&self) -> Self {
        let mut limbs = self.0;
        for limb in limbs.iter_mut() {
            *limb = !*limb;
        }
        Self(limbs)
    }

    fn and(&self, other: &Self) -> Self {
        let mut limbs = self.0;
        for (a, b) in limbs.iter_mut().zip(other.0.iter()) {
            *a &= *b;
        }
        Self(limbs)
    }

    fn is_zero(&self) -> bool {
        self.0.iter().all(|limb| *limb == 0)
    }
}

/// 64-bit mask, the common case for small graphs.
pub type Mask64 = Mask<1>;
/// 128-bit mask.
pub type Mask128 = Mask<2>;
/// 192-bit mask.
pub type Mask192 = Mask<3>;
/// 256-bit mask.
pub type Mask256 = Mask<4>;
/// 320-bit mask.
pub type Mask320 = Mask<5>;
/// 384-bit mask.
pub type Mask384 = Mask<6>;
/// 448-bit mask.
pub type Mask448 = Mask<7>;

/// Marker for the concrete [`BitMask`] width chosen at runtime for a given
/// edge count.
///
/// Reference widths: 64, 128, 192, 256, 320, 384, 448.
/// Expand this enum (and [`with_bitmask`]'s arms) to add wider cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    W64,
    W128,
    W192,
    W256,
    W320,
    W384,
    W448,
}

impl WidthClass {
    /// The number of bits this class provides.
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::W64 => 64,
            Self::W128 => 128,
            Self::W192 => 192,
            Self::W256 => 256,
            Self::W320 => 320,
            Self::W384 => 384,
            Self::W448 => 448,
        }
    }

    /// The largest width this build supports.
    pub const LARGEST_BITS: usize = 448;

    /// Select the smallest configured width that is `>= requested` bits.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedWidth`] when `requested` exceeds
    /// [`Self::LARGEST_BITS`].
    pub fn select(requested: usize) -> Result<Self, CoreError> {
        const CLASSES: [WidthClass; 7] = [
            WidthClass::W64,
            WidthClass::W128,
            WidthClass::W192,
            WidthClass::W256,
            WidthClass::W320,
            WidthClass::W384,
            WidthClass::W448,
        ];
        CLASSES
            .into_iter()
            .find(|class| class.bits() >= requested)
            .ok_or(CoreError::UnsupportedWidth {
                requested,
                largest_available: Self::LARGEST_BITS,
            })
    }
}

/// Dispatch on a [`WidthClass`], binding `$Mask` to the concrete [`Mask`]
/// alias for that case before evaluating `$body`.
///
/// This is a "static cases on E" dispatch: the width is
/// only known at runtime, but every downstream consumer (the filter specs,
/// the ZDD engine) is generic over a concrete `BitMask` type, so the match
/// monomorphizes `$body` once per configured width.
///
/// ```
/// use unfold_zdd_core::bitmask::{BitMask, WidthClass, with_bitmask};
///
/// let class = WidthClass::select(100).unwrap();
/// let zero_is_zero = with_bitmask!(class, |Mask| { Mask::zero().is_zero() });
/// assert!(zero_is_zero);
/// ```
#[macro_export]
macro_rules! with_bitmask {
    ($class:expr, |$Mask:ident| $body:block) => {
        match $class {
            $crate::bitmask::WidthClass::W64 => {
                type $Mask = $crate::bitmask::Mask64;
                $body
            }
            $crate::bitmask::WidthClass::W128 => {
                type $Mask = $crate::bitmask::Mask128;
                $body
            }
            $crate::bitmask::WidthClass::W192 => {
                type $Mask = $crate::bitmask::Mask192;
                $body
            }
            $crate::bitmask::WidthClass::W256 => {
                type $Mask = $crate::bitmask::Mask256;
                $body
            }
            $crate::bitmask::WidthClass::W320 => {
                type $Mask = $crate::bitmask::Mask320;
                $body
            }
            $crate::bitmask::WidthClass::W384 => {
                type $Mask = $crate::bitmask::Mask384;
                $body
            }
            $crate::bitmask::WidthClass::W448 => {
                type $Mask = $crate::bitmask::Mask448;
                $body
            }
        }
    };
}

pub use with_bitmask;

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn bit_out_of_range_is_zero() {
        assert!(Mask64::bit(64).is_zero());
        assert!(Mask128::bit(128).is_zero());
    }

    #[test]
    fn not_is_involution() {
        let mut m = Mask128::bit(5);
        m.or_assign(&Mask128::bit(70));
        assert_eq!(m.not().not(), m);
    }

    #[test]
    fn select_picks_smallest_covering_width() {
        assert_eq!(WidthClass::select(1).unwrap(), WidthClass::W64);
        assert_eq!(WidthClass::select(64).unwrap(), WidthClass::W64);
        assert_eq!(WidthClass::select(65).unwrap(), WidthClass::W128);
        assert_eq!(WidthClass::select(448).unwrap(), WidthClass::W448);
        assert!(WidthClass::select(449).is_err());
    }

    proptest! {
        #[test]
        fn or_and_are_commutative(a in 0u64..1024, b in 0u64..1024) {
            let ma = Mask128::bit(a as usize % 128);
            let mb = Mask128::bit(b as usize % 128);
            prop_assert_eq!(ma.and(&mb), mb.and(&ma));
        }

        #[test]
        fn and_with_self_is_identity(a in 0usize..128) {
            let m = Mask128::bit(a);
            prop_assert_eq!(m.and(&m), m);
        }

        #[test]
        fn de_morgan(a in 0usize..64, b in 0usize..64) {
            let ma = Mask64::bit(a);
            let mb = Mask64::bit(b);
            let mut union = ma;
            union.or_assign(&mb);
            prop_assert_eq!(union.not(), ma.not().and(&mb.not()));
        }
    }
}
