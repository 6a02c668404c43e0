// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A local development chain backed by a JSON file.
//!
//! The file holds the Counter contract's storage, STRK balances and
//! allowances, and the raw `CounterChanged` log. [`DevnetClient`] executes
//! the contract's rules against it and implements every gateway trait, so
//! the view model can run end to end without a node.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    action::{ALLOWANCE_MARKER, BALANCE_MARKER},
    address::Address,
    event::CounterEvent,
    felt::Felt,
    gateway::{
        AccountContext, DeploymentProbe, DeploymentStatus, EventGateway, GatewayError,
        ReadGateway, TxOutcome, WriteGateway,
    },
    schema::{names, COUNTER_CONTRACT},
};

/// Network name used when none is given at init.
pub const DEFAULT_NETWORK: &str = "devnet";

/// One STRK in base units (18 decimals).
pub const STRK: u128 = 1_000_000_000_000_000_000;

/// Fee charged by `reset`.
pub const RESET_FEE: u128 = STRK;

/// Errors touching the state file.
#[derive(Debug, Error)]
pub enum DevnetError {
    /// The state file does not exist yet.
    #[error("no devnet state at {0} (run `devnet init` first)")]
    NotInitialized(PathBuf),

    /// `init` would overwrite an existing state file.
    #[error("devnet state already exists at {0}")]
    AlreadyInitialized(PathBuf),

    /// Reading or writing the state file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The state file is not valid JSON for [`DevnetState`].
    #[error("invalid devnet state: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DevnetError> for GatewayError {
    fn from(err: DevnetError) -> Self {
        GatewayError::new(err.to_string())
    }
}

/// Everything stored in the state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevnetState {
    /// Network display name.
    pub network: String,
    /// Name the Counter contract is deployed under.
    pub contract: String,
    /// Height of the latest block.
    pub block_number: u64,
    /// Counter storage.
    pub counter: u32,
    /// Contract owner, receives the reset fee.
    pub owner: Address,
    /// STRK balances in base units.
    #[serde(default)]
    pub balances: BTreeMap<Address, u128>,
    /// STRK amounts each account has approved the contract to spend.
    #[serde(default)]
    pub allowances: BTreeMap<Address, u128>,
    /// Raw `CounterChanged` log records, oldest first.
    #[serde(default)]
    pub events: Vec<Value>,
}

impl DevnetState {
    /// Fresh deployment with the counter at zero.
    #[must_use]
    pub fn new(owner: Address, network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            contract: names::CONTRACT.to_string(),
            block_number: 0,
            counter: 0,
            owner,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// STRK balance of `account` in base units.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// STRK allowance granted by `account` in base units.
    #[must_use]
    pub fn allowance_of(&self, account: &Address) -> u128 {
        self.allowances.get(account).copied().unwrap_or(0)
    }

    /// Runs a mutating entry point as `caller`. On revert the state is
    /// left untouched and the revert reason is returned.
    ///
    /// # Errors
    ///
    /// Returns the revert reason.
    pub fn execute(&mut self, caller: &Address, function: &str, args: &[Felt]) -> Result<u64, String> {
        let expected_args = usize::from(function == names::SET_COUNTER);
        if args.len() != expected_args {
            return Err(format!(
                "Expected {expected_args} argument(s) for {function}, got {}",
                args.len()
            ));
        }

        let old_value = self.counter;
        let new_value = match function {
            names::INCREMENT => old_value
                .checked_add(1)
                .ok_or_else(|| "u32_add Overflow".to_string())?,
            names::DECREMENT => old_value.saturating_sub(1),
            names::SET_COUNTER => {
                if caller != &self.owner {
                    return Err("Caller is not the owner".to_string());
                }
                args[0]
                    .to_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| "Value does not fit in u32".to_string())?
            }
            names::RESET => {
                self.charge_reset_fee(caller)?;
                0
            }
            other => {
                return Err(format!(
                    "Function {other} not found in {}",
                    self.contract
                ))
            }
        };

        self.counter = new_value;
        self.block_number += 1;
        self.events.push(
            CounterEvent {
                old_value: Some(Felt::from(u64::from(old_value))),
                new_value: Some(Felt::from(u64::from(new_value))),
                caller: Some(caller.clone()),
                block_number: Some(self.block_number),
            }
            .to_raw(),
        );

        Ok(self.block_number)
    }

    fn charge_reset_fee(&mut self, caller: &Address) -> Result<(), String> {
        let balance = self.balance_of(caller);
        if balance < RESET_FEE {
            return Err(BALANCE_MARKER.to_string());
        }
        let allowance = self.allowance_of(caller);
        if allowance < RESET_FEE {
            return Err(ALLOWANCE_MARKER.to_string());
        }

        let remaining = balance - RESET_FEE;
        let owner_before = if caller == &self.owner {
            remaining
        } else {
            self.balance_of(&self.owner)
        };
        let owner_after = owner_before
            .checked_add(RESET_FEE)
            .ok_or_else(|| "u256_add Overflow".to_string())?;

        self.balances.insert(caller.clone(), remaining);
        self.allowances.insert(caller.clone(), allowance - RESET_FEE);
        self.balances.insert(self.owner.clone(), owner_after);
        Ok(())
    }
}

/// Handle on a state file.
#[derive(Debug, Clone)]
pub struct LocalChain {
    path: PathBuf,
}

impl LocalChain {
    /// Points at `path`; nothing is read until needed.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the state file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deploys a fresh Counter contract owned by `owner`.
    ///
    /// # Errors
    ///
    /// [`DevnetError::AlreadyInitialized`] if the file exists and `force`
    /// is not set, or an I/O or encoding error.
    pub fn init(
        &self,
        owner: Address,
        network: Option<&str>,
        force: bool,
    ) -> Result<DevnetState, DevnetError> {
        if self.exists() && !force {
            return Err(DevnetError::AlreadyInitialized(self.path.clone()));
        }

        let state = DevnetState::new(owner, network.unwrap_or(DEFAULT_NETWORK));
        self.save(&state)?;
        info!(path = %self.path.display(), owner = %state.owner, "devnet initialized");
        Ok(state)
    }

    /// Reads the state file.
    ///
    /// # Errors
    ///
    /// [`DevnetError::NotInitialized`] if the file is missing, or an I/O or
    /// decoding error.
    pub fn load(&self) -> Result<DevnetState, DevnetError> {
        if !self.exists() {
            return Err(DevnetError::NotInitialized(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the state file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or encoding error.
    pub fn save(&self, state: &DevnetState) -> Result<(), DevnetError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Credits `amount` base units of STRK to `account`. Returns the new
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns a load or save error.
    pub fn fund(&self, account: &Address, amount: u128) -> Result<u128, DevnetError> {
        self.update(|state| {
            let balance = state.balances.entry(account.clone()).or_insert(0);
            *balance = balance.saturating_add(amount);
            *balance
        })
    }

    /// Sets the amount `account` lets the contract spend. Returns it.
    ///
    /// # Errors
    ///
    /// Returns a load or save error.
    pub fn approve(&self, account: &Address, amount: u128) -> Result<u128, DevnetError> {
        self.update(|state| {
            state.allowances.insert(account.clone(), amount);
            amount
        })
    }

    /// A gateway acting as `account`.
    #[must_use]
    pub fn connect(&self, account: Option<Address>) -> DevnetClient {
        DevnetClient {
            chain: self.clone(),
            account,
        }
    }

    fn update<T>(&self, f: impl FnOnce(&mut DevnetState) -> T) -> Result<T, DevnetError> {
        let mut state = self.load()?;
        let out = f(&mut state);
        self.save(&state)?;
        Ok(out)
    }
}

/// Gateway over a [`LocalChain`], signing writes as one account.
#[derive(Debug, Clone)]
pub struct DevnetClient {
    chain: LocalChain,
    account: Option<Address>,
}

impl DevnetClient {
    /// The chain this client talks to.
    #[must_use]
    pub fn chain(&self) -> &LocalChain {
        &self.chain
    }

    fn load_contract(&self, contract: &str) -> Result<DevnetState, GatewayError> {
        let state = self.chain.load()?;
        if state.contract != contract {
            return Err(GatewayError::new(format!(
                "Contract {contract} not found on {}",
                state.network
            )));
        }
        Ok(state)
    }
}

#[async_trait]
impl ReadGateway for DevnetClient {
    async fn read(&self, contract: &str, function: &str) -> Result<Felt, GatewayError> {
        let state = self.load_contract(contract)?;

        match function {
            names::GET_COUNTER => Ok(Felt::from(u64::from(state.counter))),
            names::OWNER => Ok(state.owner.as_felt().clone()),
            other => Err(GatewayError::new(format!(
                "Function {other} not found in {contract}"
            ))),
        }
    }
}

#[async_trait]
impl WriteGateway for DevnetClient {
    async fn send(
        &self,
        contract: &str,
        function: &str,
        args: &[Felt],
    ) -> Result<TxOutcome, GatewayError> {
        let caller = self
            .account
            .as_ref()
            .ok_or_else(|| GatewayError::new("Wallet not connected"))?;
        let mut state = self.load_contract(contract)?;

        let is_write = COUNTER_CONTRACT
            .get_function(function)
            .is_some_and(|f| f.mutates);
        if !is_write {
            return Err(GatewayError::new(format!(
                "Function {function} not found in {contract}"
            )));
        }

        let block_number = state
            .execute(caller, function, args)
            .map_err(|reason| GatewayError::new(format!("Transaction reverted: {reason}")))?;
        self.chain.save(&state)?;

        debug!(function, block_number, caller = %caller, "transaction accepted");
        Ok(TxOutcome { block_number })
    }
}

#[async_trait]
impl EventGateway for DevnetClient {
    async fn history(
        &self,
        contract: &str,
        event: &str,
        from_block: u64,
    ) -> Result<Vec<CounterEvent>, GatewayError> {
        let state = self.load_contract(contract)?;
        if COUNTER_CONTRACT.get_event(event).is_none() {
            return Err(GatewayError::new(format!(
                "Event {event} not found in {contract}"
            )));
        }

        let mut events = Vec::with_capacity(state.events.len());
        for raw in &state.events {
            let parsed = CounterEvent::from_raw(raw)
                .map_err(|err| GatewayError::new(format!("malformed {event} record: {err}")))?;
            if parsed.block_number.unwrap_or(0) >= from_block {
                events.push(parsed);
            }
        }
        Ok(events)
    }
}

impl AccountContext for DevnetClient {
    fn account(&self) -> Option<Address> {
        self.account.clone()
    }
}

#[async_trait]
impl DeploymentProbe for DevnetClient {
    async fn status(&self, contract: &str) -> Result<DeploymentStatus, GatewayError> {
        if !self.chain.exists() {
            return Ok(DeploymentStatus::NotFound);
        }
        let state = self.chain.load()?;
        Ok(if state.contract == contract {
            DeploymentStatus::Deployed
        } else {
            DeploymentStatus::NotFound
        })
    }

    fn network_name(&self) -> String {
        self.chain
            .load()
            .map_or_else(|_| DEFAULT_NETWORK.to_string(), |state| state.network)
    }
}
