// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! View-model behaviour against a scripted gateway.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use counter_dapp::{
    gateway::{
        AccountContext, DeploymentProbe, EventGateway, ReadGateway, WriteGateway,
    },
    schema::names,
    ActionError, Address, CounterEvent, CounterViewModel, DeploymentStatus, EventFeed, Felt,
    GatewayError, TxOutcome, NOTIFICATION_TTL,
};
use tokio::{sync::Notify, time::advance};

#[derive(Default)]
struct Script {
    counter: u64,
    owner: Option<Felt>,
    account: Option<Address>,
    events: Vec<CounterEvent>,
    send_results: VecDeque<Result<u64, GatewayError>>,
    sent: Vec<(String, Vec<Felt>)>,
    fail_reads: bool,
}

/// Gateway whose answers are scripted by the test.
#[derive(Default)]
struct FakeChain {
    script: Mutex<Script>,
    gate: Option<Arc<Notify>>,
}

impl FakeChain {
    fn new() -> Self {
        Self::default()
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        f(&mut self.script.lock().expect("script lock"))
    }

    fn sent(&self) -> Vec<(String, Vec<Felt>)> {
        self.with(|s| s.sent.clone())
    }
}

#[async_trait]
impl ReadGateway for FakeChain {
    async fn read(&self, _contract: &str, function: &str) -> Result<Felt, GatewayError> {
        self.with(|s| {
            if s.fail_reads {
                return Err(GatewayError::new("RPC unavailable"));
            }
            match function {
                names::GET_COUNTER => Ok(Felt::from(s.counter)),
                names::OWNER => s
                    .owner
                    .clone()
                    .ok_or_else(|| GatewayError::new("owner not set")),
                other => Err(GatewayError::new(format!("unknown view {other}"))),
            }
        })
    }
}

#[async_trait]
impl WriteGateway for FakeChain {
    async fn send(
        &self,
        _contract: &str,
        function: &str,
        args: &[Felt],
    ) -> Result<TxOutcome, GatewayError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.with(|s| {
            s.sent.push((function.to_string(), args.to_vec()));
            let result = s.send_results.pop_front().unwrap_or(Ok(1));
            if result.is_ok() {
                s.counter += 1;
            }
            result.map(|block_number| TxOutcome { block_number })
        })
    }
}

#[async_trait]
impl EventGateway for FakeChain {
    async fn history(
        &self,
        _contract: &str,
        _event: &str,
        from_block: u64,
    ) -> Result<Vec<CounterEvent>, GatewayError> {
        Ok(self.with(|s| {
            s.events
                .iter()
                .filter(|e| e.block_number.unwrap_or(0) >= from_block)
                .cloned()
                .collect()
        }))
    }
}

impl AccountContext for FakeChain {
    fn account(&self) -> Option<Address> {
        self.with(|s| s.account.clone())
    }
}

#[async_trait]
impl DeploymentProbe for FakeChain {
    async fn status(&self, _contract: &str) -> Result<DeploymentStatus, GatewayError> {
        Ok(DeploymentStatus::Deployed)
    }

    fn network_name(&self) -> String {
        "fake".to_string()
    }
}

fn addr(s: &str) -> Address {
    Address::parse(s).expect("valid address")
}

fn view_model(chain: FakeChain) -> (Arc<FakeChain>, CounterViewModel<FakeChain>) {
    let chain = Arc::new(chain);
    let vm = CounterViewModel::new(Arc::clone(&chain));
    (chain, vm)
}

#[tokio::test]
async fn blank_set_value_never_reaches_the_chain() {
    let (chain, vm) = view_model(FakeChain::new());

    let err = vm.handle_set_counter("").await.expect_err("blank input");

    assert_eq!(err, ActionError::LocalValidation("Please enter a value".to_string()));
    assert_eq!(
        vm.notifications().error_message().as_deref(),
        Some("Please enter a value")
    );
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn non_integer_set_value_is_rejected_locally() {
    let (chain, vm) = view_model(FakeChain::new());

    let err = vm.handle_set_counter("twelve").await.expect_err("bad input");

    assert!(matches!(err, ActionError::LocalValidation(_)));
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn successful_increment_notifies_and_refetches() {
    let (chain, vm) = view_model(FakeChain::new());
    vm.refresh().await.expect_err("owner not scripted yet");
    assert_eq!(vm.counter(), Some(Felt::from(0)));

    let outcome = vm.handle_increment().await.expect("increment");

    assert_eq!(outcome.block_number, 1);
    assert_eq!(chain.sent(), [("increment".to_string(), vec![])]);
    assert_eq!(vm.counter(), Some(Felt::from(1)));
    assert_eq!(
        vm.notifications().success_message().as_deref(),
        Some("Counter incremented successfully!")
    );
    assert!(!vm.pending().any());
}

#[tokio::test]
async fn set_value_sends_the_parsed_argument_and_clears_the_draft() {
    let (chain, vm) = view_model(FakeChain::new());
    vm.set_draft("0x2a");

    vm.submit_draft().await.expect("set");

    assert_eq!(chain.sent(), [("set_counter".to_string(), vec![Felt::from(42)])]);
    assert_eq!(vm.draft(), "");
    assert_eq!(
        vm.notifications().success_message().as_deref(),
        Some("Counter value set successfully!")
    );
}

#[tokio::test]
async fn failed_set_value_keeps_the_draft() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| {
        s.send_results
            .push_back(Err(GatewayError::new("Caller is not the owner")))
    });
    vm.set_draft("5");

    let err = vm.submit_draft().await.expect_err("reverted");

    assert_eq!(
        err,
        ActionError::GenericWriteFailure("Caller is not the owner".to_string())
    );
    assert_eq!(vm.draft(), "5");
}

#[tokio::test]
async fn reset_failures_are_classified() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| {
        s.send_results.extend([
            Err(GatewayError::new(
                "Transaction reverted: Insufficient token allowance",
            )),
            Err(GatewayError::new(
                "Transaction reverted: Insufficient token balance",
            )),
            Err(GatewayError::without_message()),
        ]);
    });

    assert_eq!(
        vm.handle_reset().await,
        Err(ActionError::InsufficientAllowance)
    );
    let shown = vm.notifications().error_message().expect("error shown");
    assert!(shown.starts_with("Insufficient STRK token allowance"));

    assert_eq!(vm.handle_reset().await, Err(ActionError::InsufficientBalance));
    let shown = vm.notifications().error_message().expect("error shown");
    assert!(shown.starts_with("Insufficient STRK token balance"));

    vm.handle_reset().await.expect_err("no message");
    let shown = vm.notifications().error_message().expect("error shown");
    assert!(shown.starts_with("Error resetting counter."));
}

#[tokio::test]
async fn increment_failures_pass_through_verbatim() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| {
        s.send_results
            .push_back(Err(GatewayError::new("Insufficient token allowance")))
    });

    vm.handle_increment().await.expect_err("reverted");

    assert_eq!(
        vm.notifications().error_message().as_deref(),
        Some("Insufficient token allowance")
    );
}

#[tokio::test]
async fn refetch_failure_after_success_is_swallowed() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| s.fail_reads = true);

    vm.handle_decrement().await.expect("write succeeded");

    assert_eq!(vm.counter(), None);
    assert_eq!(
        vm.notifications().success_message().as_deref(),
        Some("Counter decremented successfully!")
    );
    assert_eq!(vm.notifications().error_message(), None);
}

#[tokio::test]
async fn pending_flag_tracks_the_in_flight_write() {
    let gate = Arc::new(Notify::new());
    let (_chain, vm) = view_model(FakeChain::gated(Arc::clone(&gate)));

    let (result, ()) = tokio::join!(vm.handle_reset(), async {
        tokio::task::yield_now().await;
        let pending = vm.pending();
        assert!(pending.reset);
        assert!(!pending.increment);
        assert!(vm.snapshot().pending.reset);
        gate.notify_one();
    });

    result.expect("reset");
    assert!(!vm.pending().reset);
}

#[tokio::test]
async fn ownership_compares_numerically() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| {
        s.owner = Some(Felt::from(1));
        s.account = Some(addr("0x1"));
    });
    assert!(!vm.is_owner(), "owner unknown before first read");

    vm.refresh().await.expect("refresh");
    assert!(vm.is_owner());
    assert!(vm.snapshot().is_owner);

    chain.with(|s| s.account = Some(addr("0x2")));
    assert!(!vm.is_owner());

    chain.with(|s| s.account = None);
    assert!(!vm.snapshot().is_owner);
}

#[tokio::test]
async fn events_follow_gateway_order() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| {
        s.owner = Some(Felt::from(1));
        s.events = vec![
            CounterEvent {
                old_value: Some(Felt::from(3)),
                new_value: Some(Felt::from(4)),
                caller: Some(addr("0x9")),
                block_number: Some(8),
            },
            CounterEvent {
                old_value: None,
                new_value: Some(Felt::from(1)),
                caller: None,
                block_number: Some(2),
            },
        ];
    });
    assert_eq!(vm.snapshot().events, EventFeed::Empty);

    vm.refresh().await.expect("refresh");

    let EventFeed::Rows(rows) = vm.snapshot().events else {
        panic!("expected event rows");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].block, "8");
    assert_eq!(rows[0].caller, "0x9");
    assert_eq!(rows[1].old_value, "0");
    assert_eq!(rows[1].caller, "");
}

#[tokio::test(start_paused = true)]
async fn outcome_messages_expire_after_five_seconds() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| s.send_results.push_back(Err(GatewayError::new("boom"))));

    vm.handle_increment().await.expect_err("first fails");
    advance(Duration::from_secs(2)).await;
    vm.handle_increment().await.expect("second succeeds");

    let snapshot = vm.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some("boom"));
    assert!(snapshot.success.is_some());

    advance(NOTIFICATION_TTL - Duration::from_secs(2) + Duration::from_millis(1)).await;
    let snapshot = vm.snapshot();
    assert_eq!(snapshot.error, None);
    assert!(snapshot.success.is_some());

    advance(Duration::from_secs(2)).await;
    assert_eq!(vm.snapshot().success, None);
}

#[tokio::test]
async fn concurrent_outcomes_fill_both_slots() {
    let (chain, vm) = view_model(FakeChain::new());
    chain.with(|s| {
        s.send_results.extend([
            Ok(1),
            Err(GatewayError::new("Insufficient token balance")),
        ]);
    });

    let (inc, reset) = tokio::join!(vm.handle_increment(), vm.handle_reset());

    inc.expect("increment");
    assert_eq!(reset, Err(ActionError::InsufficientBalance));
    let snapshot = vm.snapshot();
    assert!(snapshot.success.is_some());
    assert!(snapshot.error.is_some());
}
