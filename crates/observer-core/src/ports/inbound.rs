//! Inbound port: what the transport and presentation collaborators call.
//!
//! Transport side: feed raw messages in arrival order and announce each new
//! connection. Presentation side: pull a snapshot, optionally after waiting
//! on the revision channel.

use tokio::sync::watch;

use crate::projection::{Projection, ProjectionSummary};
use crate::service::IngestOutcome;

/// Observer API
pub trait ObserverApi: Send + Sync {
    /// Decode and reconcile one raw text message. Never fails the caller;
    /// the outcome says what happened.
    fn ingest(&self, raw: &str) -> IngestOutcome;

    /// Mark the start of a new connection epoch. Returns the epoch number.
    fn begin_epoch(&self) -> u64;

    /// Owned snapshot of nodes, wallets and the event log.
    fn snapshot(&self) -> Projection;

    /// Counts only, without cloning the collections.
    fn summary(&self) -> ProjectionSummary;

    /// Revision counter, bumped after every processed message.
    fn subscribe(&self) -> watch::Receiver<u64>;
}
