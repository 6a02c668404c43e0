// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Capability boundaries to the chain.
//!
//! The view model never talks to an RPC node directly. It is handed a value
//! implementing these traits: a wallet-backed provider in production, the
//! [`devnet`](crate::devnet) client locally, or a scripted fake in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::{address::Address, event::CounterEvent, felt::Felt};

/// Failure reported by a gateway.
///
/// The message is whatever the provider or wallet produced (revert reason,
/// user rejection, transport failure). It may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("gateway request failed"))]
pub struct GatewayError {
    message: Option<String>,
}

impl GatewayError {
    /// Creates an error carrying a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Creates an error with no message at all.
    #[must_use]
    pub fn without_message() -> Self {
        Self { message: None }
    }

    /// The message, if the gateway supplied a non-empty one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Result of an accepted write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    /// Block that included the transaction.
    pub block_number: u64,
}

/// Whether a named contract is deployed on the target network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStatus {
    /// Code is present at the contract's address.
    Deployed,
    /// No contract by that name on this network.
    NotFound,
}

/// Read access to contract views.
#[async_trait]
pub trait ReadGateway: Send + Sync {
    /// Calls a view function and returns its latest value.
    async fn read(&self, contract: &str, function: &str) -> Result<Felt, GatewayError>;
}

/// Write access to contract entry points, signed by the connected account.
#[async_trait]
pub trait WriteGateway: Send + Sync {
    /// Submits a transaction and waits for it to be accepted or rejected.
    async fn send(
        &self,
        contract: &str,
        function: &str,
        args: &[Felt],
    ) -> Result<TxOutcome, GatewayError>;
}

/// Access to a contract's event log.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Returns events named `event` from `from_block` onward, in chain order.
    async fn history(
        &self,
        contract: &str,
        event: &str,
        from_block: u64,
    ) -> Result<Vec<CounterEvent>, GatewayError>;
}

/// The connected wallet.
pub trait AccountContext: Send + Sync {
    /// The connected account, or `None` when disconnected.
    fn account(&self) -> Option<Address>;
}

/// Lookup of deployed contracts on the target network.
#[async_trait]
pub trait DeploymentProbe: Send + Sync {
    /// Reports whether `contract` is deployed.
    async fn status(&self, contract: &str) -> Result<DeploymentStatus, GatewayError>;

    /// Display name of the target network.
    fn network_name(&self) -> String;
}

/// Everything the counter view model needs from the chain.
pub trait ChainGateway:
    ReadGateway + WriteGateway + EventGateway + AccountContext + DeploymentProbe
{
}

impl<T> ChainGateway for T where
    T: ReadGateway + WriteGateway + EventGateway + AccountContext + DeploymentProbe
{
}
