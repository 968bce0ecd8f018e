//! Read-only view handed to presentation layers.
//!
//! A `Projection` is an owned snapshot: nodes and wallets in first-seen
//! order plus the retained event log. It never aliases live state.

use serde::Serialize;
use shared_types::{NodeView, WalletView};

use crate::domain::LoggedEnvelope;

/// Snapshot of the observer after some number of processed envelopes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Processed-envelope counter at snapshot time.
    pub revision: u64,
    /// Current connection epoch.
    pub epoch: u64,
    pub nodes: Vec<NodeView>,
    pub wallets: Vec<WalletView>,
    pub event_log: Vec<LoggedEnvelope>,
    /// Entries that fell out of the bounded log.
    pub evicted_events: u64,
}

/// Headline numbers for status lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub revision: u64,
    pub epoch: u64,
    pub node_count: usize,
    pub wallet_count: usize,
    /// Sum of `blocks.len()` over every node's chain.
    pub total_blocks: usize,
    /// Node reporting the greatest chain length, first-seen wins ties.
    pub longest_chain: Option<(String, u64)>,
    pub logged_events: usize,
    pub evicted_events: u64,
}

impl Projection {
    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn wallet(&self, id: &str) -> Option<&WalletView> {
        self.wallets.iter().find(|w| w.id == id)
    }

    /// Logged envelopes whose `nodeId` is `node_id`.
    pub fn events_for<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a LoggedEnvelope> {
        self.event_log
            .iter()
            .filter(move |e| e.envelope.node_id == node_id)
    }

    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary::from_parts(
            self.revision,
            self.epoch,
            self.nodes.iter(),
            self.wallets.len(),
            self.event_log.len(),
            self.evicted_events,
        )
    }
}

impl ProjectionSummary {
    pub(crate) fn from_parts<'a>(
        revision: u64,
        epoch: u64,
        nodes: impl Iterator<Item = &'a NodeView>,
        wallet_count: usize,
        logged_events: usize,
        evicted_events: u64,
    ) -> Self {
        let mut node_count = 0;
        let mut total_blocks = 0;
        let mut longest: Option<&NodeView> = None;
        for node in nodes {
            node_count += 1;
            total_blocks += node.blockchain.blocks.len();
            if longest.map_or(true, |l| node.blockchain.length > l.blockchain.length) {
                longest = Some(node);
            }
        }

        Self {
            revision,
            epoch,
            node_count,
            wallet_count,
            total_blocks,
            longest_chain: longest.map(|n| (n.id.clone(), n.blockchain.length)),
            logged_events,
            evicted_events,
        }
    }
}
