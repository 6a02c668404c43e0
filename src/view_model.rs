// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The counter view model.
//!
//! Composes the chain gateways into the state a display surface needs:
//! the counter value, the owner and ownership flag, one pending flag per
//! write, the two notification slots, and the event feed.
//!
//! Handlers take `&self` so several may be in flight at once. They are not
//! serialized: when two resolve close together, the later outcome is the
//! one left in each notification slot.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use tracing::{debug, error, warn};

use crate::{
    action::{parse_counter_input, ActionError, WriteAction},
    address::{is_owner, Address},
    event::CounterEvent,
    feed::EventFeed,
    felt::Felt,
    gateway::{ChainGateway, DeploymentStatus, GatewayError, TxOutcome},
    notification::Notifications,
    schema::names,
};

/// Which contract and event the view model is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Deployed contract name.
    pub contract: String,
    /// Event whose history is shown.
    pub event: String,
    /// First block of the event history.
    pub from_block: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            contract: names::CONTRACT.to_string(),
            event: names::COUNTER_CHANGED.to_string(),
            from_block: 0,
        }
    }
}

/// In-flight state of each write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PendingFlags {
    /// `increment` is in flight.
    pub increment: bool,
    /// `decrement` is in flight.
    pub decrement: bool,
    /// `set_counter` is in flight.
    pub set_counter: bool,
    /// `reset` is in flight.
    pub reset: bool,
}

impl PendingFlags {
    /// Flag for one action.
    #[must_use]
    pub fn get(&self, action: WriteAction) -> bool {
        match action {
            WriteAction::Increment => self.increment,
            WriteAction::Decrement => self.decrement,
            WriteAction::SetCounter => self.set_counter,
            WriteAction::Reset => self.reset,
        }
    }

    /// Whether any write is in flight.
    #[must_use]
    pub fn any(&self) -> bool {
        WriteAction::ALL.into_iter().any(|action| self.get(action))
    }
}

/// Everything a display surface reads, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Counter value, `None` until first read.
    pub counter: Option<Felt>,
    /// Contract owner, `None` until first read.
    pub owner: Option<Address>,
    /// Connected account.
    pub account: Option<Address>,
    /// Connected account is the owner.
    pub is_owner: bool,
    /// In-flight writes.
    pub pending: PendingFlags,
    /// Visible success message.
    pub success: Option<String>,
    /// Visible error message.
    pub error: Option<String>,
    /// Event list to show.
    pub events: EventFeed,
}

#[derive(Debug, Default)]
struct ChainState {
    counter: Option<Felt>,
    owner: Option<Address>,
    events: Option<Vec<CounterEvent>>,
    events_loading: bool,
    draft: String,
}

#[derive(Debug, Default)]
struct PendingCells {
    increment: AtomicBool,
    decrement: AtomicBool,
    set_counter: AtomicBool,
    reset: AtomicBool,
}

impl PendingCells {
    fn cell(&self, action: WriteAction) -> &AtomicBool {
        match action {
            WriteAction::Increment => &self.increment,
            WriteAction::Decrement => &self.decrement,
            WriteAction::SetCounter => &self.set_counter,
            WriteAction::Reset => &self.reset,
        }
    }

    fn begin(&self, action: WriteAction) -> PendingGuard<'_> {
        let cell = self.cell(action);
        cell.store(true, Ordering::Release);
        PendingGuard(cell)
    }

    fn load(&self) -> PendingFlags {
        PendingFlags {
            increment: self.increment.load(Ordering::Acquire),
            decrement: self.decrement.load(Ordering::Acquire),
            set_counter: self.set_counter.load(Ordering::Acquire),
            reset: self.reset.load(Ordering::Acquire),
        }
    }
}

/// Clears a pending flag when the write resolves, whichever way.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State and handlers behind the counter page.
///
/// Dropping the view model cancels the notification timers.
#[derive(Debug)]
pub struct CounterViewModel<G> {
    gateway: Arc<G>,
    config: ViewConfig,
    state: Mutex<ChainState>,
    pending: PendingCells,
    notifications: Notifications,
}

impl<G: ChainGateway> CounterViewModel<G> {
    /// Binds a view model to `gateway` with the default contract names.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_config(gateway, ViewConfig::default())
    }

    /// Binds a view model to `gateway` and an explicit contract binding.
    #[must_use]
    pub fn with_config(gateway: Arc<G>, config: ViewConfig) -> Self {
        Self {
            gateway,
            config,
            state: Mutex::default(),
            pending: PendingCells::default(),
            notifications: Notifications::new(),
        }
    }

    /// The underlying gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The contract binding.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Checks that the bound contract exists on the target network.
    ///
    /// # Errors
    ///
    /// Propagates the probe's [`GatewayError`].
    pub async fn deployment(&self) -> Result<DeploymentStatus, GatewayError> {
        self.gateway.status(&self.config.contract).await
    }

    /// Reads the counter, the owner and the event history.
    ///
    /// Every read is attempted; values that were read are kept even if a
    /// later one fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`GatewayError`] encountered.
    pub async fn refresh(&self) -> Result<(), GatewayError> {
        let counter = self.refetch_counter().await.map(drop);
        let owner = self.refetch_owner().await.map(drop);
        let events = self.refetch_events().await;
        counter.and(owner).and(events)
    }

    /// Re-reads the counter value.
    ///
    /// # Errors
    ///
    /// Propagates the read gateway's [`GatewayError`].
    pub async fn refetch_counter(&self) -> Result<Felt, GatewayError> {
        let value = self
            .gateway
            .read(&self.config.contract, names::GET_COUNTER)
            .await?;
        debug!(%value, "counter value read");
        self.lock().counter = Some(value.clone());
        Ok(value)
    }

    /// Re-reads the contract owner.
    ///
    /// # Errors
    ///
    /// Propagates the read gateway's [`GatewayError`].
    pub async fn refetch_owner(&self) -> Result<Address, GatewayError> {
        let owner = Address::from(self.gateway.read(&self.config.contract, names::OWNER).await?);
        debug!(%owner, "contract owner read");
        self.lock().owner = Some(owner.clone());
        Ok(owner)
    }

    /// Re-reads the event history. The feed shows its loading placeholder
    /// while this runs; on failure the previous history is kept.
    ///
    /// # Errors
    ///
    /// Propagates the event gateway's [`GatewayError`].
    pub async fn refetch_events(&self) -> Result<(), GatewayError> {
        self.lock().events_loading = true;
        let result = self
            .gateway
            .history(&self.config.contract, &self.config.event, self.config.from_block)
            .await;

        let mut state = self.lock();
        state.events_loading = false;
        let events = result?;
        debug!(count = events.len(), "event history read");
        state.events = Some(events);
        Ok(())
    }

    /// Connected account, as reported by the wallet right now.
    #[must_use]
    pub fn account(&self) -> Option<Address> {
        self.gateway.account()
    }

    /// Whether the connected account owns the contract.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        let account = self.account();
        is_owner(account.as_ref(), self.lock().owner.as_ref())
    }

    /// Last counter value read.
    #[must_use]
    pub fn counter(&self) -> Option<Felt> {
        self.lock().counter.clone()
    }

    /// Last owner read.
    #[must_use]
    pub fn owner(&self) -> Option<Address> {
        self.lock().owner.clone()
    }

    /// In-flight writes.
    #[must_use]
    pub fn pending(&self) -> PendingFlags {
        self.pending.load()
    }

    /// The notification slots.
    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Text currently typed for `set_counter`.
    #[must_use]
    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    /// Replaces the text typed for `set_counter`.
    pub fn set_draft(&self, input: impl Into<String>) {
        self.lock().draft = input.into();
    }

    /// Captures the current display state.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        let account = self.account();
        let state = self.lock();

        CounterSnapshot {
            counter: state.counter.clone(),
            owner: state.owner.clone(),
            is_owner: is_owner(account.as_ref(), state.owner.as_ref()),
            account,
            pending: self.pending.load(),
            success: self.notifications.success_message(),
            error: self.notifications.error_message(),
            events: EventFeed::build(state.events.as_deref(), state.events_loading),
        }
    }

    /// Adds one to the counter.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, which has also been posted to the
    /// error slot.
    pub async fn handle_increment(&self) -> Result<TxOutcome, ActionError> {
        self.run(WriteAction::Increment, Vec::new()).await
    }

    /// Subtracts one from the counter.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, which has also been posted to the
    /// error slot.
    pub async fn handle_decrement(&self) -> Result<TxOutcome, ActionError> {
        self.run(WriteAction::Decrement, Vec::new()).await
    }

    /// Resets the counter, paying the 1 STRK fee.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, which has also been posted to the
    /// error slot.
    pub async fn handle_reset(&self) -> Result<TxOutcome, ActionError> {
        self.run(WriteAction::Reset, Vec::new()).await
    }

    /// Sets the counter to the value typed in `input`.
    ///
    /// Blank or non-integer input is rejected without a network call. On
    /// success the draft is cleared.
    ///
    /// # Errors
    ///
    /// Returns the validation or classified failure, which has also been
    /// posted to the error slot.
    pub async fn handle_set_counter(&self, input: &str) -> Result<TxOutcome, ActionError> {
        let value = match parse_counter_input(input) {
            Ok(value) => value,
            Err(err) => {
                self.notifications.error(err.to_string());
                return Err(err);
            }
        };

        let outcome = self.run(WriteAction::SetCounter, vec![value]).await?;
        self.lock().draft.clear();
        Ok(outcome)
    }

    /// Submits the current draft through [`Self::handle_set_counter`].
    ///
    /// # Errors
    ///
    /// See [`Self::handle_set_counter`].
    pub async fn submit_draft(&self) -> Result<TxOutcome, ActionError> {
        let draft = self.draft();
        self.handle_set_counter(&draft).await
    }

    async fn run(&self, action: WriteAction, args: Vec<Felt>) -> Result<TxOutcome, ActionError> {
        let pending = self.pending.begin(action);
        debug!(function = action.function(), "sending transaction");
        let result = self
            .gateway
            .send(&self.config.contract, action.function(), &args)
            .await;
        drop(pending);

        match result {
            Ok(outcome) => {
                self.notifications.success(action.success_message());
                if let Err(err) = self.refetch_counter().await {
                    warn!(%err, "counter refetch after {} failed", action.function());
                }
                Ok(outcome)
            }
            Err(err) => {
                error!(%err, "{} failed", action.function());
                let classified = ActionError::classify(action, &err);
                self.notifications.error(classified.to_string());
                Err(classified)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
