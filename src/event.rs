// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! `CounterChanged` events.
//!
//! Gateways hand back raw log records shaped as
//! `{ "log": { "block_number": .. }, "parsedArgs": { "old_value": .., "new_value": .., "caller": .. } }`.
//! They are parsed into [`CounterEvent`] once, at the boundary.

use serde_json::Value;
use thiserror::Error;

use crate::{address::Address, felt::Felt};

/// Error produced when a raw log record has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventParseError {
    /// The record is not a JSON object.
    #[error("event record must be an object")]
    NotAnObject,

    /// A field holds a value of the wrong type or an invalid number.
    #[error("invalid event field '{field}': {reason}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// One `CounterChanged` emission.
///
/// Fields are optional because indexers may drop them; display code
/// substitutes `"0"` for missing numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterEvent {
    /// Value before the change.
    pub old_value: Option<Felt>,
    /// Value after the change.
    pub new_value: Option<Felt>,
    /// Account that triggered the change.
    pub caller: Option<Address>,
    /// Block in which the change was included.
    pub block_number: Option<u64>,
}

impl CounterEvent {
    /// Parses a raw log record.
    ///
    /// # Errors
    ///
    /// Returns [`EventParseError`] when the record is not an object or a
    /// present field cannot be read as a number.
    pub fn from_raw(raw: &Value) -> Result<Self, EventParseError> {
        let record = raw.as_object().ok_or(EventParseError::NotAnObject)?;
        let args = record.get("parsedArgs");
        let arg = |name: &str| args.and_then(|a| a.get(name)).filter(|v| !v.is_null());

        let old_value = arg("old_value")
            .map(|v| felt_field(v, "parsedArgs.old_value"))
            .transpose()?;
        let new_value = arg("new_value")
            .map(|v| felt_field(v, "parsedArgs.new_value"))
            .transpose()?;
        let caller = arg("caller")
            .map(|v| felt_field(v, "parsedArgs.caller").map(Address::from))
            .transpose()?;

        let block_number = record
            .get("log")
            .and_then(|log| log.get("block_number"))
            .filter(|v| !v.is_null())
            .map(|v| {
                felt_field(v, "log.block_number")?
                    .to_u64()
                    .ok_or_else(|| EventParseError::InvalidField {
                        field: "log.block_number",
                        reason: "does not fit in u64".to_string(),
                    })
            })
            .transpose()?;

        Ok(Self {
            old_value,
            new_value,
            caller,
            block_number,
        })
    }

    /// Encodes the event in the raw log record shape.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        serde_json::json!({
            "log": { "block_number": self.block_number },
            "parsedArgs": {
                "old_value": self.old_value,
                "new_value": self.new_value,
                "caller": self.caller,
            },
        })
    }
}

fn felt_field(value: &Value, field: &'static str) -> Result<Felt, EventParseError> {
    match value {
        Value::String(s) => Felt::parse(s).map_err(|err| EventParseError::InvalidField {
            field,
            reason: err.to_string(),
        }),
        Value::Number(n) => n.as_u64().map(Felt::from).ok_or_else(|| {
            EventParseError::InvalidField {
                field,
                reason: format!("{n} is not an unsigned integer"),
            }
        }),
        other => Err(EventParseError::InvalidField {
            field,
            reason: format!("unexpected {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
