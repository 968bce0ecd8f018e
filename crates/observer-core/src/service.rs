//! Observer service: the single writer over state and event log.
//!
//! Messages are processed strictly one at a time under one lock, so
//! reconciliation of message N+1 always sees the state left by message N.
//! Nothing inside the lock blocks or awaits.
//!
//! ```text
//! raw text ──Envelope::decode──┬── DecodeError ──→ warn, discard
//!                              │
//!                              └── Envelope ──→ event log
//!                                     │
//!                                     └── ObserverState::apply ──→ Applied / Ignored
//! ```

use parking_lot::Mutex;
use shared_types::{DecodeError, Envelope};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::{ObserverConfig, ReconnectPolicy};
use crate::domain::{AppliedChange, EventLog, ObserverState};
use crate::error::{ObserverError, ObserverResult, ReconcileError};
use crate::metrics;
use crate::ports::inbound::ObserverApi;
use crate::projection::{Projection, ProjectionSummary};

/// What happened to one raw message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Logged and changed state.
    Applied(AppliedChange),
    /// Logged, state untouched.
    Ignored(ReconcileError),
    /// Not an envelope; neither logged nor applied.
    Discarded(DecodeError),
}

impl IngestOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, IngestOutcome::Applied(_))
    }

    pub fn into_result(self) -> ObserverResult<AppliedChange> {
        match self {
            IngestOutcome::Applied(change) => Ok(change),
            IngestOutcome::Ignored(err) => Err(ObserverError::Reconcile(err)),
            IngestOutcome::Discarded(err) => Err(ObserverError::Decode(err)),
        }
    }
}

struct Inner {
    state: ObserverState,
    log: EventLog,
    epoch: u64,
    revision: u64,
}

pub struct ObserverService {
    config: ObserverConfig,
    inner: Mutex<Inner>,
    revision_tx: watch::Sender<u64>,
}

impl ObserverService {
    pub fn new(config: ObserverConfig) -> Self {
        let (revision_tx, _) = watch::channel(0);
        let inner = Inner {
            state: ObserverState::new(),
            log: EventLog::new(config.event_log_capacity),
            epoch: 0,
            revision: 0,
        };
        Self {
            config,
            inner: Mutex::new(inner),
            revision_tx,
        }
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Decode, log and reconcile one raw text message.
    pub fn ingest(&self, raw: &str) -> IngestOutcome {
        let envelope = match Envelope::decode(raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                metrics::record_decode_failure();
                warn!(
                    error = %err,
                    payload = %truncate(raw, self.config.max_logged_payload_chars),
                    "Discarding malformed message"
                );
                self.bump_revision();
                return IngestOutcome::Discarded(err);
            }
        };
        metrics::record_envelope_decoded();

        let mut inner = self.inner.lock();
        let outcome = inner.state.apply(&envelope);
        let epoch = inner.epoch;
        let seq = inner.log.push(epoch, envelope);

        let outcome = match outcome {
            Ok(change) => {
                report_applied(seq, &change);
                IngestOutcome::Applied(change)
            }
            Err(err) => {
                report_ignored(seq, &err);
                IngestOutcome::Ignored(err)
            }
        };

        metrics::set_state_size(
            inner.state.node_count(),
            inner.state.wallet_count(),
            inner.log.len(),
        );
        inner.revision += 1;
        let revision = inner.revision;
        drop(inner);

        self.revision_tx.send_replace(revision);
        outcome
    }

    /// Start a new connection epoch, applying the reconnect policy.
    ///
    /// Under `Reset`, every epoch after the first begins from empty state.
    pub fn begin_epoch(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.epoch += 1;
        let epoch = inner.epoch;

        if epoch > 1 && self.config.reconnect_policy == ReconnectPolicy::Reset {
            info!(
                epoch,
                dropped_nodes = inner.state.node_count(),
                dropped_wallets = inner.state.wallet_count(),
                "Resetting observed state for new connection"
            );
            inner.state = ObserverState::new();
            inner.log.clear();
            metrics::set_state_size(0, 0, 0);
        } else {
            info!(epoch, policy = ?self.config.reconnect_policy, "Connection epoch started");
        }

        inner.revision += 1;
        let revision = inner.revision;
        drop(inner);

        self.revision_tx.send_replace(revision);
        epoch
    }

    pub fn snapshot(&self) -> Projection {
        let inner = self.inner.lock();
        Projection {
            revision: inner.revision,
            epoch: inner.epoch,
            nodes: inner.state.nodes().cloned().collect(),
            wallets: inner.state.wallets().to_vec(),
            event_log: inner.log.iter().cloned().collect(),
            evicted_events: inner.log.evicted(),
        }
    }

    pub fn summary(&self) -> ProjectionSummary {
        let inner = self.inner.lock();
        ProjectionSummary::from_parts(
            inner.revision,
            inner.epoch,
            inner.state.nodes(),
            inner.state.wallet_count(),
            inner.log.len(),
            inner.log.evicted(),
        )
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    fn bump_revision(&self) {
        let mut inner = self.inner.lock();
        inner.revision += 1;
        let revision = inner.revision;
        drop(inner);
        self.revision_tx.send_replace(revision);
    }
}

impl Default for ObserverService {
    fn default() -> Self {
        Self::new(ObserverConfig::default())
    }
}

impl ObserverApi for ObserverService {
    fn ingest(&self, raw: &str) -> IngestOutcome {
        ObserverService::ingest(self, raw)
    }

    fn begin_epoch(&self) -> u64 {
        ObserverService::begin_epoch(self)
    }

    fn snapshot(&self) -> Projection {
        ObserverService::snapshot(self)
    }

    fn summary(&self) -> ProjectionSummary {
        ObserverService::summary(self)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        ObserverService::subscribe(self)
    }
}

fn report_applied(seq: u64, change: &AppliedChange) {
    let event = match change {
        AppliedChange::NodeSpawned { node_id } => {
            debug!(seq, node_id = %node_id, "Node spawned");
            "SpawnedNode"
        }
        AppliedChange::WalletCreated { address } => {
            debug!(seq, wallet = %address, "Wallet created");
            "CreatedWallet"
        }
        AppliedChange::RoutingUpdated {
            node_id,
            neighbour_count,
        } => {
            debug!(seq, node_id = %node_id, neighbour_count, "Routing info updated");
            "UpdatedRoutingInfo"
        }
        AppliedChange::BlockchainReplaced {
            node_id,
            cause,
            length,
            blocks,
            reported_lengths,
        } => {
            if let Some((old_length, new_length)) = reported_lengths {
                debug!(seq, node_id = %node_id, old_length, new_length, "Fresher chain announced");
            }
            debug!(seq, node_id = %node_id, length, blocks, "Blockchain replaced");
            cause.event_id()
        }
        AppliedChange::CandidateBlockNoted { node_id } => {
            debug!(seq, node_id = %node_id, "Candidate block noted");
            "ReceivedNewBlock"
        }
    };
    metrics::record_event_applied(event);
}

fn report_ignored(seq: u64, err: &ReconcileError) {
    match err {
        ReconcileError::UnknownEvent { event_id, scope } => {
            warn!(seq, event_id = %event_id, scope = %scope, "Unprocessed event");
        }
        ReconcileError::UnresolvedNode { node_id, event_id } => {
            warn!(seq, node_id = %node_id, event_id = %event_id, "Event references unseen node");
        }
        other => {
            warn!(seq, reason = other.reason(), error = %other, "Event left state unchanged");
        }
    }
    metrics::record_event_ignored(err.reason());
}

fn truncate(raw: &str, max_chars: usize) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
