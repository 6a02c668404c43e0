// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Display rows for the `CounterChanged` history.

use crate::event::CounterEvent;

/// One formatted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    /// Value before the change, decimal, `"0"` when unknown.
    pub old_value: String,
    /// Value after the change, decimal, `"0"` when unknown.
    pub new_value: String,
    /// Caller as hex, empty when unknown.
    pub caller: String,
    /// Block number, `"0"` when unknown.
    pub block: String,
}

impl EventRow {
    /// Formats a single event.
    #[must_use]
    pub fn from_event(event: &CounterEvent) -> Self {
        let number = |value: Option<String>| value.unwrap_or_else(|| "0".to_string());

        Self {
            old_value: number(event.old_value.as_ref().map(ToString::to_string)),
            new_value: number(event.new_value.as_ref().map(ToString::to_string)),
            caller: event
                .caller
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            block: number(event.block_number.map(|b| b.to_string())),
        }
    }
}

/// What the event list should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFeed {
    /// History is still being fetched. Carries the number of events
    /// already held from the previous fetch.
    Loading(usize),
    /// Fetched, and there is nothing to show.
    Empty,
    /// Rows in the order the gateway returned them.
    Rows(Vec<EventRow>),
}

impl EventFeed {
    /// Builds the feed. Loading takes precedence over any events already
    /// held, and a history that was never fetched counts as empty.
    #[must_use]
    pub fn build(events: Option<&[CounterEvent]>, loading: bool) -> Self {
        if loading {
            return Self::Loading(events.map_or(0, <[CounterEvent]>::len));
        }

        match events {
            Some(events) if !events.is_empty() => {
                Self::Rows(events.iter().map(EventRow::from_event).collect())
            }
            _ => Self::Empty,
        }
    }

    /// Number of events for the "N events" counter. While loading this
    /// is the count already held.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Rows(rows) => rows.len(),
            Self::Loading(held) => *held,
            Self::Empty => 0,
        }
    }

    /// Whether there are no rows to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{address::Address, felt::Felt};

    fn event(old: u64, new: u64, block: u64) -> CounterEvent {
        CounterEvent {
            old_value: Some(Felt::from(old)),
            new_value: Some(Felt::from(new)),
            caller: Some(Address::parse("0xbeef").expect("addr")),
            block_number: Some(block),
        }
    }

    #[test]
    fn loading_wins_over_events() {
        let events = [event(0, 1, 1)];
        assert_eq!(EventFeed::build(Some(&events[..]), true), EventFeed::Loading(1));
        assert_eq!(EventFeed::build(Some(&[][..]), true), EventFeed::Loading(0));
        assert_eq!(EventFeed::build(None, true), EventFeed::Loading(0));
    }

    #[test]
    fn refetch_keeps_held_count() {
        let events = [event(0, 1, 1), event(1, 2, 2)];
        let feed = EventFeed::build(Some(&events[..]), true);
        assert_eq!(feed.len(), 2);
        assert!(!feed.is_empty());
    }

    #[test]
    fn empty_or_unfetched_is_empty() {
        assert_eq!(EventFeed::build(Some(&[][..]), false), EventFeed::Empty);
        assert_eq!(EventFeed::build(None, false), EventFeed::Empty);
    }

    #[test]
    fn keeps_gateway_order() {
        let events = [event(5, 6, 9), event(0, 1, 2)];
        let EventFeed::Rows(rows) = EventFeed::build(Some(&events[..]), false) else {
            panic!("expected rows");
        };
        let blocks: Vec<_> = rows.iter().map(|r| r.block.as_str()).collect();
        assert_eq!(blocks, ["9", "2"]);
        assert_eq!(rows[0].caller, "0xbeef");
    }

    #[test]
    fn missing_numbers_render_zero() {
        let row = EventRow::from_event(&CounterEvent::default());
        assert_eq!(row.old_value, "0");
        assert_eq!(row.new_value, "0");
        assert_eq!(row.block, "0");
        assert_eq!(row.caller, "");
    }

    #[test]
    fn formatting_is_stable() {
        let e = event(41, 42, 7);
        assert_eq!(EventRow::from_event(&e), EventRow::from_event(&e));
    }
}
