//! Non-negative decimal big integers, represented as plain digit strings.
//!
//! Burnside accumulation and the final division by `|Aut(Γ)|` only ever
//! need addition and division by a small positive divisor, so rather than
//! pull in a full bignum crate for two operations, this module hand-rolls
//! schoolbook decimal addition and short division.

use core::fmt;

use error_stack::{Report, ResultExt};

use crate::error::CoreError;

/// A non-negative arbitrary-precision integer stored as a decimal string.
///
/// The textual representation has no leading zeros (except for the value
/// zero itself, which is `"0"`), matching the `spanning_tree_count`-style
/// decimal strings in the Result JSON.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(String);

impl Decimal {
    /// The value zero.
    #[must_use]
    pub fn zero() -> Self {
        Self("0".to_owned())
    }

    /// Build a `Decimal` from a native integer.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(value.to_string())
    }

    /// Parse a decimal string, rejecting anything but an optional run of
    /// ASCII digits with no sign and no redundant leading zeros.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedDecimal`] if `s` is empty, contains a
    /// non-digit byte, or has a leading zero followed by more digits.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::MalformedDecimal);
        }
        if s.len() > 1 && s.as_bytes()[0] == b'0' {
            return Err(CoreError::MalformedDecimal);
        }
        Ok(Self(s.to_owned()))
    }

    /// Borrow the decimal digits, most significant first, no leading zeros
    /// (except the single digit `"0"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` iff this value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    /// Schoolbook decimal addition.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let a = self.0.as_bytes();
        let b = other.0.as_bytes();
        let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);

        let mut carry = 0u8;
        let mut ai = a.len();
        let mut bi = b.len();
        while ai > 0 || bi > 0 || carry > 0 {
            let da = if ai > 0 {
                ai -= 1;
                a[ai] - b'0'
            } else {
                0
            };
            let db = if bi > 0 {
                bi -= 1;
                b[bi] - b'0'
            } else {
                0
            };
            let sum = da + db + carry;
            out.push(b'0' + sum % 10);
            carry = sum / 10;
        }
        out.reverse();
        Self(String::from_utf8(out).expect("decimal digits are always valid UTF-8"))
    }

    /// `*self += other`, in place.
    pub fn add_assign(&mut self, other: &Self) {
        *self = self.add(other);
    }

    /// Schoolbook decimal subtraction, `self - other`.
    ///
    /// Used to turn the overlap filter's literal "at least one MOPE edge
    /// survives" cardinality into the Result JSON's `non_overlapping_count`
    /// (`spanning_tree_count - filtered_cardinality`; the filtered ZDD is
    /// always a sub-diagram of the unfiltered one, so the difference is
    /// always non-negative).
    ///
    /// # Panics
    ///
    /// Panics (via `debug_assert!`) if `other > self`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert!(self >= other, "Decimal::sub requires self >= other");
        let a = self.0.as_bytes();
        let b = other.0.as_bytes();
        let mut out = Vec::with_capacity(a.len());

        let mut borrow = 0i8;
        let mut ai = a.len();
        let mut bi = b.len();
        while ai > 0 {
            ai -= 1;
            let da = i8::try_from(a[ai] - b'0').expect("single decimal digit fits i8");
            let db = if bi > 0 {
                bi -= 1;
                i8::try_from(b[bi] - b'0').expect("single decimal digit fits i8")
            } else {
                0
            };
            let mut diff = da - db - borrow;
            if diff < 0 {
                diff += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(b'0' + u8::try_from(diff).expect("digit difference fits u8"));
        }
        out.reverse();

        let first_nonzero = out.iter().position(|&d| d != b'0').unwrap_or(out.len() - 1);
        Self(String::from_utf8(out[first_nonzero..].to_vec()).expect("decimal digits are always valid UTF-8"))
    }

    /// Divide by a small positive divisor, returning the quotient and the
    /// remainder.
    ///
    /// Used for Burnside's `N = S / |Aut(Γ)|`; the remainder lets the
    /// caller detect a "sum not divisible by group order" invariant
    /// violation without re-deriving it from `N * divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DivisionByZero`] if `divisor` is zero.
    pub fn divmod_small(&self, divisor: u64) -> Result<(Self, u64), Report<CoreError>> {
        if divisor == 0 {
            return Err(Report::new(CoreError::DivisionByZero))
                .attach_printable("Burnside group order must be positive");
        }

        let mut quotient = Vec::with_capacity(self.0.len());
        let mut carry = 0u128;
        for byte in self.0.bytes() {
            let digit = u128::from(byte - b'0');
            let acc = carry * 10 + digit;
            let q = acc / u128::from(divisor);
            carry = acc % u128::from(divisor);
            quotient.push(b'0' + u8::try_from(q).change_context(CoreError::MalformedDecimal)?);
        }

        // strip leading zeros, keeping at least one digit
        let first_nonzero = quotient
            .iter()
            .position(|&d| d != b'0')
            .unwrap_or(quotient.len() - 1);
        let quotient = quotient[first_nonzero..].to_vec();

        Ok((
            Self(String::from_utf8(quotient).expect("decimal digits are always valid UTF-8")),
            u64::try_from(carry).expect("remainder is smaller than the u64 divisor"),
        ))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}
