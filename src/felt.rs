// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Field elements as returned by the chain.
//!
//! Every value crossing the gateway boundary (counter values, addresses,
//! call arguments) is a field element below the Stark prime. Values arrive
//! either as `0x`-prefixed hex or as decimal strings; both parse into the
//! same integer domain so comparisons are numeric.

use std::{fmt, str::FromStr, sync::OnceLock};

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a string is not a valid field element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFeltError {
    /// The input was empty or whitespace only.
    #[error("empty value")]
    Empty,

    /// The input contains a character that is not a digit of its radix.
    #[error("invalid digit in '{input}'")]
    InvalidDigit {
        /// The rejected input.
        input: String,
    },

    /// The value does not fit below the field modulus.
    #[error("value '{input}' exceeds the field modulus")]
    OutOfRange {
        /// The rejected input.
        input: String,
    },
}

/// An element of the Stark field, `0 <= value < P`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Felt(BigUint);

/// `P = 2^251 + 17 * 2^192 + 1`.
fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| (BigUint::one() << 251) + (BigUint::from(17u32) << 192) + 1u32)
}

impl Felt {
    /// The zero element.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Parses a field element from `0x`-prefixed hex or from decimal.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFeltError`] when the input is empty, contains a
    /// character outside its radix, or is not below the field modulus.
    pub fn parse(input: &str) -> Result<Self, ParseFeltError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseFeltError::Empty);
        }

        let (digits, radix) = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (trimmed, 10),
        };

        let valid = !digits.is_empty()
            && digits.chars().all(|c| match radix {
                16 => c.is_ascii_hexdigit(),
                _ => c.is_ascii_digit(),
            });
        if !valid {
            return Err(ParseFeltError::InvalidDigit {
                input: trimmed.to_string(),
            });
        }

        let value = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| {
            ParseFeltError::InvalidDigit {
                input: trimmed.to_string(),
            }
        })?;

        Self::from_biguint(value).ok_or_else(|| ParseFeltError::OutOfRange {
            input: trimmed.to_string(),
        })
    }

    /// Wraps an integer, returning `None` when it is not below the modulus.
    #[must_use]
    pub fn from_biguint(value: BigUint) -> Option<Self> {
        (&value < modulus()).then_some(Self(value))
    }

    /// Borrows the underlying integer.
    #[must_use]
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Returns the value as a `u64` if it fits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Returns `true` for the zero element.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Lowercase `0x`-prefixed hex without padding.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl FromStr for Felt {
    type Err = ParseFeltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Decimal rendering, matching how counter values are shown.
impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Serialize for Felt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Felt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FeltVisitor)
    }
}

struct FeltVisitor;

impl de::Visitor<'_> for FeltVisitor {
    type Value = Felt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hex or decimal string, or an unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Felt, E> {
        Ok(Felt::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Felt, E> {
        u64::try_from(value)
            .map(Felt::from)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Felt, E> {
        Felt::parse(value).map_err(E::custom)
    }
}
