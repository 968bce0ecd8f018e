//! Typed network events.
//!
//! An `Envelope` carries an open-ended `details` object keyed by a string
//! tag. `NetworkEvent::classify` turns it into a closed union, parsing the
//! payload against the schema for that tag. A payload that does not fit
//! fails closed with `ReconcileError::InvalidPayload`.
//!
//! Scope matters: `SpawnedNode` and `CreatedWallet` only count when sent
//! under `Main`. From any other node they classify as `Unrecognized`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared_types::{Envelope, EventScope, RawBlockchain};

use crate::error::ReconcileError;

/// Recognized `eventId` tags.
pub mod event_ids {
    pub const SPAWNED_NODE: &str = "SpawnedNode";
    pub const CREATED_WALLET: &str = "CreatedWallet";
    pub const UPDATED_ROUTING_INFO: &str = "UpdatedRoutingInfo";
    pub const CREATED_BLOCKCHAIN: &str = "CreatedBlockchain";
    pub const RECEIVED_FRESHER_BLOCKCHAIN: &str = "ReceivedFresherBlockchain";
    pub const RECEIVED_NEW_BLOCK: &str = "ReceivedNewBlock";
}

use self::event_ids::*;

/// Which event replaced a node's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementCause {
    Created,
    ReceivedFresher,
}

impl ReplacementCause {
    pub fn event_id(self) -> &'static str {
        match self {
            ReplacementCause::Created => CREATED_BLOCKCHAIN,
            ReplacementCause::ReceivedFresher => RECEIVED_FRESHER_BLOCKCHAIN,
        }
    }
}

/// Closed union over the events the observer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkEvent {
    SpawnedNode {
        node_id: String,
    },
    CreatedWallet {
        wallet_address: String,
    },
    UpdatedRoutingInfo {
        neighbour_count: u64,
    },
    BlockchainReplaced {
        cause: ReplacementCause,
        blockchain: RawBlockchain,
        /// `(oldLength, newLength)` when the sender reported them.
        reported_lengths: Option<(u64, u64)>,
    },
    ReceivedNewBlock,
    Unrecognized {
        event_id: String,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpawnedNodeDetails {
    node_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedWalletDetails {
    wallet_address: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutingDetails {
    neighbour_count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockchainDetails {
    raw_blockchain_data: RawBlockchain,
    #[serde(default)]
    old_length: Option<u64>,
    #[serde(default)]
    new_length: Option<u64>,
}

impl NetworkEvent {
    /// Type an envelope. First matching rule wins.
    pub fn classify(envelope: &Envelope) -> Result<Self, ReconcileError> {
        let event_id = envelope.event_id.as_str();
        let event = match (envelope.scope(), event_id) {
            (EventScope::Main, SPAWNED_NODE) => {
                let details: SpawnedNodeDetails = parse_details(envelope)?;
                NetworkEvent::SpawnedNode {
                    node_id: details.node_id,
                }
            }
            (EventScope::Main, CREATED_WALLET) => {
                let details: CreatedWalletDetails = parse_details(envelope)?;
                NetworkEvent::CreatedWallet {
                    wallet_address: details.wallet_address,
                }
            }
            (_, UPDATED_ROUTING_INFO) => {
                let details: RoutingDetails = parse_details(envelope)?;
                NetworkEvent::UpdatedRoutingInfo {
                    neighbour_count: details.neighbour_count,
                }
            }
            (_, CREATED_BLOCKCHAIN) => blockchain_replaced(envelope, ReplacementCause::Created)?,
            (_, RECEIVED_FRESHER_BLOCKCHAIN) => {
                blockchain_replaced(envelope, ReplacementCause::ReceivedFresher)?
            }
            (_, RECEIVED_NEW_BLOCK) => NetworkEvent::ReceivedNewBlock,
            _ => NetworkEvent::Unrecognized {
                event_id: event_id.to_string(),
            },
        };
        Ok(event)
    }

    /// Metric/log label for the event kind.
    pub fn label(&self) -> &str {
        match self {
            NetworkEvent::SpawnedNode { .. } => SPAWNED_NODE,
            NetworkEvent::CreatedWallet { .. } => CREATED_WALLET,
            NetworkEvent::UpdatedRoutingInfo { .. } => UPDATED_ROUTING_INFO,
            NetworkEvent::BlockchainReplaced { cause, .. } => cause.event_id(),
            NetworkEvent::ReceivedNewBlock => RECEIVED_NEW_BLOCK,
            NetworkEvent::Unrecognized { event_id } => event_id,
        }
    }
}

fn blockchain_replaced(
    envelope: &Envelope,
    cause: ReplacementCause,
) -> Result<NetworkEvent, ReconcileError> {
    let details: BlockchainDetails = parse_details(envelope)?;
    Ok(NetworkEvent::BlockchainReplaced {
        cause,
        blockchain: details.raw_blockchain_data,
        reported_lengths: details.old_length.zip(details.new_length),
    })
}

fn parse_details<T: DeserializeOwned>(envelope: &Envelope) -> Result<T, ReconcileError> {
    serde_json::from_str(envelope.details_json()).map_err(|e| ReconcileError::InvalidPayload {
        event_id: envelope.event_id.clone(),
        reason: e.to_string(),
    })
}
