//! # View Entities
//!
//! The canonical, hex-encoded model of the observed network. These are what
//! the projection hands to presentation layers, serialized in camelCase.
//!
//! ## Clusters
//!
//! - **Network**: `NodeView`, `WalletView`
//! - **Chain**: `BlockchainView`, `BlockView`
//! - **Transactions**: `TransactionView`, `InputView`, `OutputView`

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: THE NETWORK
// =============================================================================

/// A simulated peer as seen by the observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    /// Opaque node identifier (the simulator uses node names).
    pub id: String,
    /// Append-only activity log for this node.
    pub messages: Vec<String>,
    /// Number of neighbours reported by the last routing update.
    pub neighbour_count: u64,
    /// The node's locally held copy of the chain.
    pub blockchain: BlockchainView,
}

impl NodeView {
    /// A freshly spawned node: no messages, no neighbours, empty chain.
    pub fn spawned(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            neighbour_count: 0,
            blockchain: BlockchainView::default(),
        }
    }

    /// Hash of the last block in wire order, if any.
    pub fn tip_hash(&self) -> Option<&str> {
        self.blockchain.blocks.last().map(|b| b.hash.as_str())
    }
}

/// A wallet announced on the network.
///
/// No event updates balances, so `balance` stays at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    /// Wallet address.
    pub id: String,
    pub balance: f64,
}

impl WalletView {
    pub fn announced(address: impl Into<String>) -> Self {
        Self {
            id: address.into(),
            balance: 0.0,
        }
    }
}

// =============================================================================
// CLUSTER B: THE CHAIN
// =============================================================================

/// One node's view of the chain.
///
/// `length` is whatever the node reported. It is not re-derived from
/// `blocks.len()` and the two may disagree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainView {
    pub length: u64,
    /// Blocks in wire order. Never re-sorted.
    pub blocks: Vec<BlockView>,
}

/// A decoded block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub index: u64,
    /// Unit is whatever the simulator used; copied untransformed.
    pub timestamp: u128,
    /// Lowercase hex.
    pub hash: String,
    /// Difficulty target, renamed from the wire's `difficulty`.
    pub proof_of_work: u128,
    pub nonce: u64,
    pub transactions: Vec<TransactionView>,
}

// =============================================================================
// CLUSTER C: TRANSACTIONS
// =============================================================================

/// A decoded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// Copied verbatim from the wire, not hex-decoded.
    pub id: String,
    pub inputs: Vec<InputView>,
    pub outputs: Vec<OutputView>,
}

/// A decoded transaction input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputView {
    /// Hex id of the referenced transaction.
    pub id: String,
    /// Index into the referenced transaction's outputs (`-1` for coinbase).
    pub out: i64,
    pub signature: String,
    pub public_key: String,
}

/// A decoded transaction output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputView {
    pub value: f64,
    pub public_key_hash: String,
}
