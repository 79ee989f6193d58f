//! BN254 scalar field element with a precision-preserving string form.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use ark_bn254::Fr;
use ark_ff::{BigInteger as _, PrimeField};
use num_bigint::BigUint;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// The scalar field modulus as an arbitrary precision integer.
static MODULUS: LazyLock<BigUint> =
    LazyLock::new(|| BigUint::from_bytes_be(&<Fr as PrimeField>::MODULUS.to_bytes_be()));

/// An element of the BN254 scalar field.
///
/// This is the atomic unit stored in tree layers and produced by the leaf hasher.
/// It renders as a decimal string and never goes through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// Wrap a raw field element.
    #[must_use]
    pub const fn new(inner: Fr) -> Self {
        Self(inner)
    }

    /// The underlying arkworks field element.
    #[must_use]
    pub const fn inner(&self) -> Fr {
        self.0
    }

    /// Canonical integer value of this element.
    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0.into_bigint().to_bytes_be())
    }
}

/// Errors raised when decoding a field element from its string form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldElementError {
    /// The string is not a decimal or `0x` hexadecimal integer.
    #[error("Invalid field element {0:?}: expected a decimal or 0x-prefixed hex integer")]
    InvalidNumber(String),

    /// The integer is not reduced modulo the field order.
    #[error("Field element {0} is not canonical (greater than or equal to the field modulus)")]
    NotCanonical(String),
}

impl From<Fr> for FieldElement {
    fn from(inner: Fr) -> Self {
        Self(inner)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl FromStr for FieldElement {
    type Err = FieldElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `parse_bytes` alone would also take `_` separators and a leading `+`.
        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) if is_digits(hex, u8::is_ascii_hexdigit) => (hex, 16),
            None if is_digits(s, u8::is_ascii_digit) => (s, 10),
            Some(_) | None => return Err(FieldElementError::InvalidNumber(s.to_owned())),
        };
        let value = BigUint::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| FieldElementError::InvalidNumber(s.to_owned()))?;

        if value >= *MODULUS {
            return Err(FieldElementError::NotCanonical(value.to_string()));
        }

        Ok(Self(Fr::from_be_bytes_mod_order(&value.to_bytes_be())))
    }
}

fn is_digits(s: &str, accept: fn(&u8) -> bool) -> bool {
    !s.is_empty() && s.as_bytes().iter().all(accept)
}
