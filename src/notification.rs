// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Transient success and error messages.
//!
//! Each kind has its own slot and its own five-second expiry. Setting a
//! slot replaces its message and restarts its timer; the other slot is left
//! alone. Expiry is enforced twice: a spawned timer clears the slot, and
//! reads ignore a message whose deadline has passed, so a message is never
//! observed past its deadline even if the timer task has not run yet.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle, time::Instant};
use tracing::trace;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// The two independent notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// An action went through.
    Success,
    /// An action failed or was rejected locally.
    Error,
}

/// A message and the instant it stops being shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Which slot holds it.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
    /// First instant at which the message is no longer visible.
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Notification>,
    timer: Option<JoinHandle<()>>,
    generation: u64,
}

impl Slot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[derive(Debug, Default)]
struct Slots {
    success: Slot,
    error: Slot,
}

impl Slots {
    fn slot_mut(&mut self, kind: NotificationKind) -> &mut Slot {
        match kind {
            NotificationKind::Success => &mut self.success,
            NotificationKind::Error => &mut self.error,
        }
    }
}

/// Owner of both notification slots.
///
/// Dropping it cancels any pending expiry timers.
#[derive(Debug)]
pub struct Notifications {
    slots: Arc<Mutex<Slots>>,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    /// Creates empty slots with the standard lifetime.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    /// Creates empty slots with a custom lifetime.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots::default())),
            ttl,
        }
    }

    /// Shows a success message.
    pub fn success(&self, message: impl Into<String>) {
        self.set(NotificationKind::Success, message.into());
    }

    /// Shows an error message.
    pub fn error(&self, message: impl Into<String>) {
        self.set(NotificationKind::Error, message.into());
    }

    /// Replaces the message in `kind`'s slot and restarts its timer.
    pub fn set(&self, kind: NotificationKind, message: String) {
        let expires_at = Instant::now() + self.ttl;
        let mut slots = self.lock();
        let slot = slots.slot_mut(kind);

        slot.cancel_timer();
        slot.generation += 1;
        slot.current = Some(Notification {
            kind,
            message,
            expires_at,
        });

        // Outside a runtime the deadline check in `active` still applies.
        if let Ok(handle) = Handle::try_current() {
            let generation = slot.generation;
            let slots = Arc::downgrade(&self.slots);
            slot.timer = Some(handle.spawn(expire(slots, kind, generation, expires_at)));
        }
    }

    /// The visible message of `kind`, if any.
    #[must_use]
    pub fn active(&self, kind: NotificationKind) -> Option<Notification> {
        let now = Instant::now();
        self.lock()
            .slot_mut(kind)
            .current
            .clone()
            .filter(|n| now < n.expires_at)
    }

    /// Visible success message text.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        self.active(NotificationKind::Success).map(|n| n.message)
    }

    /// Visible error message text.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.active(NotificationKind::Error).map(|n| n.message)
    }

    /// Clears both slots immediately.
    pub fn clear(&self) {
        let mut slots = self.lock();
        for kind in [NotificationKind::Success, NotificationKind::Error] {
            let slot = slots.slot_mut(kind);
            slot.cancel_timer();
            slot.generation += 1;
            slot.current = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Notifications {
    fn drop(&mut self) {
        let mut slots = self.lock();
        slots.success.cancel_timer();
        slots.error.cancel_timer();
    }
}

async fn expire(
    slots: Weak<Mutex<Slots>>,
    kind: NotificationKind,
    generation: u64,
    deadline: Instant,
) {
    tokio::time::sleep_until(deadline).await;

    let Some(slots) = slots.upgrade() else {
        return;
    };
    let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
    let slot = slots.slot_mut(kind);
    if slot.generation == generation {
        trace!(?kind, "notification expired");
        slot.current = None;
        slot.timer = None;
    }
}
