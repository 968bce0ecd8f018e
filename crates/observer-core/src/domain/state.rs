//! Accumulated network state and the reducer that advances it.
//!
//! `reconcile(state, envelope) -> state` is a pure transition. Each
//! envelope is typed first and only then applied, so a transition either
//! happens in full or not at all. Nothing here logs; callers get a
//! `ReconcileOutcome` and decide how to report it.
//!
//! ```text
//! Main/SpawnedNode           → append NodeView
//! Main/CreatedWallet         → append WalletView
//! */UpdatedRoutingInfo       → set neighbour_count
//! */CreatedBlockchain        → replace blockchain wholesale
//! */ReceivedFresherBlockchain→ replace blockchain wholesale
//! */ReceivedNewBlock         → append "Received a new candidate block"
//! anything else              → UnknownEvent
//! ```

use std::collections::{HashMap, HashSet};

use shared_types::{Envelope, NodeView, WalletView};

use super::block_decoder::decode_blockchain;
use super::event::event_ids::{RECEIVED_NEW_BLOCK, UPDATED_ROUTING_INFO};
use super::event::{NetworkEvent, ReplacementCause};
use crate::error::ReconcileError;

/// Message appended to a node when it hears about a candidate block.
pub const CANDIDATE_BLOCK_MESSAGE: &str = "Received a new candidate block";

/// What an applied envelope changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedChange {
    NodeSpawned {
        node_id: String,
    },
    WalletCreated {
        address: String,
    },
    RoutingUpdated {
        node_id: String,
        neighbour_count: u64,
    },
    BlockchainReplaced {
        node_id: String,
        cause: ReplacementCause,
        length: u64,
        blocks: usize,
        /// `(oldLength, newLength)` as reported by the sender, if any.
        reported_lengths: Option<(u64, u64)>,
    },
    CandidateBlockNoted {
        node_id: String,
    },
}

/// Result of applying one envelope.
pub type ReconcileOutcome = Result<AppliedChange, ReconcileError>;

/// Nodes and wallets discovered so far.
///
/// Nodes are indexed by id for constant-time updates; `node_order` keeps
/// first-seen order for iteration.
#[derive(Debug, Clone, Default)]
pub struct ObserverState {
    nodes: HashMap<String, NodeView>,
    node_order: Vec<String>,
    wallets: Vec<WalletView>,
    wallet_ids: HashSet<String>,
}

impl ObserverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type and apply one envelope.
    pub fn apply(&mut self, envelope: &Envelope) -> ReconcileOutcome {
        let event = NetworkEvent::classify(envelope)?;
        self.apply_event(&envelope.node_id, event)
    }

    /// Apply an already-typed event sent by `source`.
    pub fn apply_event(&mut self, source: &str, event: NetworkEvent) -> ReconcileOutcome {
        match event {
            NetworkEvent::SpawnedNode { node_id } => {
                if self.nodes.contains_key(&node_id) {
                    return Err(ReconcileError::DuplicateNode { node_id });
                }
                self.node_order.push(node_id.clone());
                self.nodes
                    .insert(node_id.clone(), NodeView::spawned(node_id.clone()));
                Ok(AppliedChange::NodeSpawned { node_id })
            }

            NetworkEvent::CreatedWallet { wallet_address } => {
                if !self.wallet_ids.insert(wallet_address.clone()) {
                    return Err(ReconcileError::DuplicateWallet {
                        address: wallet_address,
                    });
                }
                self.wallets.push(WalletView::announced(wallet_address.clone()));
                Ok(AppliedChange::WalletCreated {
                    address: wallet_address,
                })
            }

            NetworkEvent::UpdatedRoutingInfo { neighbour_count } => {
                let node = self.resolve(source, UPDATED_ROUTING_INFO)?;
                node.neighbour_count = neighbour_count;
                Ok(AppliedChange::RoutingUpdated {
                    node_id: source.to_string(),
                    neighbour_count,
                })
            }

            NetworkEvent::BlockchainReplaced {
                cause,
                blockchain,
                reported_lengths,
            } => {
                let node = self.resolve(source, cause.event_id())?;
                let view = decode_blockchain(&blockchain);
                let (length, blocks) = (view.length, view.blocks.len());
                node.blockchain = view;
                Ok(AppliedChange::BlockchainReplaced {
                    node_id: source.to_string(),
                    cause,
                    length,
                    blocks,
                    reported_lengths,
                })
            }

            NetworkEvent::ReceivedNewBlock => {
                let node = self.resolve(source, RECEIVED_NEW_BLOCK)?;
                node.messages.push(CANDIDATE_BLOCK_MESSAGE.to_string());
                Ok(AppliedChange::CandidateBlockNoted {
                    node_id: source.to_string(),
                })
            }

            NetworkEvent::Unrecognized { event_id } => Err(ReconcileError::UnknownEvent {
                event_id,
                scope: source.to_string(),
            }),
        }
    }

    fn resolve(&mut self, node_id: &str, event_id: &str) -> Result<&mut NodeView, ReconcileError> {
        self.nodes
            .get_mut(node_id)
            .ok_or_else(|| ReconcileError::UnresolvedNode {
                node_id: node_id.to_string(),
                event_id: event_id.to_string(),
            })
    }

    /// Node by id.
    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.get(id)
    }

    /// Nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeView> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Wallets in announcement order.
    pub fn wallets(&self) -> &[WalletView] {
        &self.wallets
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.wallets.is_empty()
    }
}

/// Pure transition: consume a state, return the next one and what happened.
pub fn reconcile(mut state: ObserverState, envelope: &Envelope) -> (ObserverState, ReconcileOutcome) {
    let outcome = state.apply(envelope);
    (state, outcome)
}
