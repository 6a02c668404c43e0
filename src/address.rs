// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Account addresses and the ownership check.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::felt::{Felt, ParseFeltError};

/// An account or contract address.
///
/// Equality is numeric: `0x1` and `1` name the same account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Felt);

impl Address {
    /// Parses an address from `0x`-prefixed hex or decimal.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFeltError`] if the input is not a field element.
    pub fn parse(input: &str) -> Result<Self, ParseFeltError> {
        Felt::parse(input).map(Self)
    }

    /// Borrows the raw field element.
    #[must_use]
    pub fn as_felt(&self) -> &Felt {
        &self.0
    }

    /// Short display form, `0x1234...cdef`, for addresses longer than ten
    /// characters.
    #[must_use]
    pub fn abbreviated(&self) -> String {
        let full = self.0.to_hex_string();
        if full.len() <= 10 {
            return full;
        }
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl From<Felt> for Address {
    fn from(felt: Felt) -> Self {
        Self(felt)
    }
}

impl From<Address> for Felt {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl FromStr for Address {
    type Err = ParseFeltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Returns `true` only when both addresses are known and numerically equal.
#[must_use]
pub fn is_owner(account: Option<&Address>, owner: Option<&Address>) -> bool {
    match (account, owner) {
        (Some(account), Some(owner)) => account == owner,
        _ => false,
    }
}
