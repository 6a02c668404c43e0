// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Interaction and display logic for the on-chain Counter dApp.
//!
//! The chain itself is reached through the traits in [`gateway`]. On top of
//! them, [`view_model::CounterViewModel`] derives the ownership flag, runs
//! the four write actions, classifies their failures, keeps the transient
//! notifications, and formats the `CounterChanged` history.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unused_must_use)]
#![deny(unused_extern_crates)]
#![deny(clippy::pedantic)]
#![warn(missing_debug_implementations, unreachable_pub, rustdoc::all)]

/// Write actions and failure classification.
pub mod action;
/// Addresses and the ownership check.
pub mod address;
/// Local file-backed chain.
pub mod devnet;
/// `CounterChanged` events.
pub mod event;
/// Event feed formatting.
pub mod feed;
/// Field elements.
pub mod felt;
/// Chain capability traits.
pub mod gateway;
/// Transient notifications.
pub mod notification;
/// Counter contract schema.
pub mod schema;
/// The counter view model.
pub mod view_model;

pub use action::{ActionError, WriteAction};
pub use address::{is_owner, Address};
pub use event::CounterEvent;
pub use feed::{EventFeed, EventRow};
pub use felt::Felt;
pub use gateway::{ChainGateway, DeploymentStatus, GatewayError, TxOutcome};
pub use notification::{Notification, NotificationKind, Notifications, NOTIFICATION_TTL};
pub use view_model::{CounterSnapshot, CounterViewModel, PendingFlags, ViewConfig};
