// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Schema of the Counter contract.
//!
//! The entry-point and event names used by the view model and the local
//! chain all come from [`COUNTER_CONTRACT`].

use serde::Serialize;

/// Entry-point and event names of the Counter contract.
pub mod names {
    /// Contract name as registered with the deployment.
    pub const CONTRACT: &str = "CounterContract";
    /// View: current counter value.
    pub const GET_COUNTER: &str = "get_counter";
    /// View: contract owner address.
    pub const OWNER: &str = "owner";
    /// Add one to the counter.
    pub const INCREMENT: &str = "increment";
    /// Subtract one from the counter.
    pub const DECREMENT: &str = "decrement";
    /// Owner-only: set the counter to an arbitrary value.
    pub const SET_COUNTER: &str = "set_counter";
    /// Reset the counter to zero for a 1 STRK fee.
    pub const RESET: &str = "reset";
    /// Event emitted on every counter change.
    pub const COUNTER_CHANGED: &str = "CounterChanged";
}

/// Schema for a contract function.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionSchema {
    /// Function name.
    pub name: &'static str,
    /// Documentation string.
    pub doc: &'static str,
    /// Input type name (or "()" for no input).
    pub input: &'static str,
    /// Output type name (or "()" for no output).
    pub output: &'static str,
    /// Whether calling this function changes contract state.
    pub mutates: bool,
}

/// Schema for a contract event.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventSchema {
    /// Event name.
    pub name: &'static str,
    /// Event member names, in emission order.
    pub members: &'static [&'static str],
}

/// Complete schema for a contract.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContractSchema {
    /// Contract name.
    pub name: &'static str,
    /// List of contract functions.
    pub functions: &'static [FunctionSchema],
    /// List of contract events.
    pub events: &'static [EventSchema],
}

impl ContractSchema {
    /// Returns an iterator over all functions.
    pub fn iter_functions(&self) -> impl Iterator<Item = &FunctionSchema> {
        self.functions.iter()
    }

    /// Returns an iterator over all events.
    pub fn iter_events(&self) -> impl Iterator<Item = &EventSchema> {
        self.events.iter()
    }

    /// Find a function by name.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&FunctionSchema> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find an event by name.
    #[must_use]
    pub fn get_event(&self, name: &str) -> Option<&EventSchema> {
        self.events.iter().find(|e| e.name == name)
    }
}

/// The Counter contract.
pub const COUNTER_CONTRACT: ContractSchema = ContractSchema {
    name: names::CONTRACT,
    functions: &[
        FunctionSchema {
            name: names::GET_COUNTER,
            doc: "Returns the current counter value.",
            input: "()",
            output: "u32",
            mutates: false,
        },
        FunctionSchema {
            name: names::OWNER,
            doc: "Returns the contract owner.",
            input: "()",
            output: "ContractAddress",
            mutates: false,
        },
        FunctionSchema {
            name: names::INCREMENT,
            doc: "Increments the counter by one.",
            input: "()",
            output: "()",
            mutates: true,
        },
        FunctionSchema {
            name: names::DECREMENT,
            doc: "Decrements the counter by one.",
            input: "()",
            output: "()",
            mutates: true,
        },
        FunctionSchema {
            name: names::SET_COUNTER,
            doc: "Sets the counter to a specific value. Owner only.",
            input: "u32",
            output: "()",
            mutates: true,
        },
        FunctionSchema {
            name: names::RESET,
            doc: "Resets the counter to zero. Costs 1 STRK, paid to the owner.",
            input: "()",
            output: "()",
            mutates: true,
        },
    ],
    events: &[EventSchema {
        name: names::COUNTER_CHANGED,
        members: &["old_value", "new_value", "caller"],
    }],
};
