// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Mutating counter operations and the classification of their failures.

use thiserror::Error;

use crate::{felt::Felt, gateway::GatewayError, schema::names};

/// Revert text the contract uses when the caller has not approved the fee.
pub const ALLOWANCE_MARKER: &str = "Insufficient token allowance";
/// Revert text the contract uses when the caller cannot pay the fee.
pub const BALANCE_MARKER: &str = "Insufficient token balance";

/// One of the four mutating entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteAction {
    /// `increment`
    Increment,
    /// `decrement`
    Decrement,
    /// `set_counter`, owner only.
    SetCounter,
    /// `reset`, costs 1 STRK.
    Reset,
}

impl WriteAction {
    /// All actions, in display order.
    pub const ALL: [Self; 4] = [Self::Increment, Self::Decrement, Self::SetCounter, Self::Reset];

    /// Contract entry point invoked by this action.
    #[must_use]
    pub const fn function(self) -> &'static str {
        match self {
            Self::Increment => names::INCREMENT,
            Self::Decrement => names::DECREMENT,
            Self::SetCounter => names::SET_COUNTER,
            Self::Reset => names::RESET,
        }
    }

    /// Notification shown after the write is accepted.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Increment => "Counter incremented successfully!",
            Self::Decrement => "Counter decremented successfully!",
            Self::SetCounter => "Counter value set successfully!",
            Self::Reset => "Counter reset successfully!",
        }
    }

    /// Notification shown when the gateway fails without a message.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Increment => "Error incrementing counter",
            Self::Decrement => "Error decrementing counter",
            Self::SetCounter => "Error setting counter",
            Self::Reset => {
                "Error resetting counter. Make sure you have at least 1 STRK token and have \
                 approved the contract to spend it."
            }
        }
    }

    /// Whether the target entry point is gated on the STRK fee, which
    /// enables the allowance and balance guidance messages.
    #[must_use]
    pub const fn checks_token_preconditions(self) -> bool {
        matches!(self, Self::SetCounter | Self::Reset)
    }
}

/// Why a counter action did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Rejected before reaching the network.
    #[error("{0}")]
    LocalValidation(String),

    /// The contract is not approved to take the 1 STRK fee.
    #[error(
        "Insufficient STRK token allowance. You need to approve the contract to spend 1 STRK \
         token. Please ensure you have at least 1 STRK token and have approved the contract to \
         spend it."
    )]
    InsufficientAllowance,

    /// The caller holds less than 1 STRK.
    #[error(
        "Insufficient STRK token balance. You need at least 1 STRK token to reset the counter."
    )]
    InsufficientBalance,

    /// Any other gateway failure, carrying the text to show.
    #[error("{0}")]
    GenericWriteFailure(String),
}

impl ActionError {
    /// Maps a gateway failure for `action` onto the user-facing taxonomy.
    ///
    /// Allowance is checked before balance. Actions without the token
    /// precondition always get the raw message or their fallback.
    #[must_use]
    pub fn classify(action: WriteAction, err: &GatewayError) -> Self {
        let message = err.message();

        if action.checks_token_preconditions() {
            if let Some(message) = message {
                if message.contains(ALLOWANCE_MARKER) {
                    return Self::InsufficientAllowance;
                }
                if message.contains(BALANCE_MARKER) {
                    return Self::InsufficientBalance;
                }
            }
        }

        Self::GenericWriteFailure(
            message
                .unwrap_or_else(|| action.fallback_message())
                .to_string(),
        )
    }
}

/// Validates the target value typed for `set_counter`.
///
/// # Errors
///
/// Returns [`ActionError::LocalValidation`] for blank or non-integer input.
pub fn parse_counter_input(input: &str) -> Result<Felt, ActionError> {
    if input.trim().is_empty() {
        return Err(ActionError::LocalValidation(
            "Please enter a value".to_string(),
        ));
    }

    Felt::parse(input).map_err(|_| {
        ActionError::LocalValidation("Please enter a valid integer value".to_string())
    })
}
