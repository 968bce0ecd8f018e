//! Error types for the observer core
//!
//! None of these are fatal. A `ReconcileError` means the envelope was logged
//! but state was left untouched; a `DecodeError` means the message never
//! became an envelope at all.

use shared_types::DecodeError;
use thiserror::Error;

/// Why an envelope did not change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// Unrecognized `eventId`, or a known one sent under the wrong scope.
    #[error("Unprocessed event {event_id} from {scope}")]
    UnknownEvent { event_id: String, scope: String },

    /// The envelope targets a node that was never spawned.
    #[error("Event {event_id} references unseen node {node_id}")]
    UnresolvedNode { node_id: String, event_id: String },

    /// A recognized event whose `details` do not match its schema.
    #[error("Invalid payload for {event_id}: {reason}")]
    InvalidPayload { event_id: String, reason: String },

    /// `SpawnedNode` for an id that already exists.
    #[error("Node already exists: {node_id}")]
    DuplicateNode { node_id: String },

    /// `CreatedWallet` for an address that already exists.
    #[error("Wallet already exists: {address}")]
    DuplicateWallet { address: String },
}

impl ReconcileError {
    /// Short label for metrics and structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            ReconcileError::UnknownEvent { .. } => "unknown_event",
            ReconcileError::UnresolvedNode { .. } => "unresolved_node",
            ReconcileError::InvalidPayload { .. } => "invalid_payload",
            ReconcileError::DuplicateNode { .. } => "duplicate_node",
            ReconcileError::DuplicateWallet { .. } => "duplicate_wallet",
        }
    }
}

/// Errors surfaced by the observer service entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserverError {
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Event ignored: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// Result type for observer operations
pub type ObserverResult<T> = Result<T, ObserverError>;
