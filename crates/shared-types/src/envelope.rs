//! # Event Envelope
//!
//! The self-describing wrapper around every message the simulator broadcasts:
//!
//! ```text
//! { "nodeId": "<node or Main>", "eventId": "<tag>", "details": { ... } }
//! ```
//!
//! `details` is held as raw JSON text until the event is typed, so large
//! integers (the simulator's `u128` difficulty) never pass through an `f64`.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::value::RawValue;

use crate::errors::{DecodeError, DecodeResult};

/// Sentinel `nodeId` for network-level control events.
pub const MAIN_SCOPE: &str = "Main";

/// Who an envelope is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope<'a> {
    /// Network-level control event (`nodeId == "Main"`).
    Main,
    /// Event emitted by a specific node.
    Node(&'a str),
}

impl std::fmt::Display for EventScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventScope::Main => f.write_str(MAIN_SCOPE),
            EventScope::Node(id) => f.write_str(id),
        }
    }
}

/// A decoded wire message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub node_id: String,
    pub event_id: String,
    /// Raw `details` object. `None` when the sender omitted it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<RawValue>>,
}

impl Envelope {
    /// Parse one raw text message.
    ///
    /// `nodeId` and `eventId` must be strings. `details` may be absent or
    /// `null` (the simulator sends `ReceivedNewBlock` without it) but if
    /// present it must be an object.
    pub fn decode(raw: &str) -> DecodeResult<Self> {
        let fields: HashMap<String, Box<RawValue>> =
            serde_json::from_str(raw).map_err(|e| DecodeError::Malformed {
                reason: e.to_string(),
            })?;

        let node_id = string_field(&fields, "nodeId")?;
        let event_id = string_field(&fields, "eventId")?;

        let details = match fields.get("details") {
            None => None,
            Some(raw) if raw.get() == "null" => None,
            Some(raw) if raw.get().starts_with('{') => Some(raw.clone()),
            Some(raw) => {
                return Err(DecodeError::InvalidField {
                    field: "details",
                    reason: format!("expected object, got {}", raw.get()),
                })
            }
        };

        Ok(Self {
            node_id,
            event_id,
            details,
        })
    }

    /// The envelope's scope.
    pub fn scope(&self) -> EventScope<'_> {
        if self.node_id == MAIN_SCOPE {
            EventScope::Main
        } else {
            EventScope::Node(&self.node_id)
        }
    }

    /// `details` as JSON text, `{}` when absent.
    pub fn details_json(&self) -> &str {
        self.details.as_deref().map(RawValue::get).unwrap_or("{}")
    }
}

fn string_field(fields: &HashMap<String, Box<RawValue>>, field: &'static str) -> DecodeResult<String> {
    let raw = fields.get(field).ok_or(DecodeError::MissingField { field })?;
    serde_json::from_str(raw.get()).map_err(|_| DecodeError::InvalidField {
        field,
        reason: format!("expected string, got {}", raw.get()),
    })
}
