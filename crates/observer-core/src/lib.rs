//! # observer-core
//!
//! Passive observer for a simulated blockchain network.
//!
//! ## Overview
//!
//! This crate provides:
//! - **Envelope decoding**: Raw text to `{nodeId, eventId, details}`
//! - **Block decoding**: Wire chains with byte-array hashes to hex-string views
//! - **Reconciliation**: A pure reducer folding envelopes into node/wallet state
//! - **Projection**: Owned snapshots for presentation layers
//!
//! ## Architecture
//!
//! ```text
//! Transport ──raw text──→ ObserverService::ingest
//!                               │
//!                               ├── Envelope::decode ──✗──→ warn, discard
//!                               │
//!                               ├── EventLog::push
//!                               │
//!                               └── ObserverState::apply ──→ revision++ ──→ subscribers
//!                                                                  │
//! Presentation ←──────────── Projection ←───── snapshot() ─────────┘
//! ```
//!
//! ## Ordering
//!
//! Envelopes are applied strictly in arrival order, one at a time. A
//! `SpawnedNode` must precede any node-scoped event for that node; events
//! for unseen nodes are logged and otherwise ignored.
//!
//! ## Example
//!
//! ```rust,ignore
//! use observer_core::{ObserverConfig, ObserverService};
//! use observer_core::ports::inbound::ObserverApi;
//!
//! let service = ObserverService::new(ObserverConfig::default());
//! service.begin_epoch();
//!
//! service.ingest(r#"{"nodeId":"Main","eventId":"SpawnedNode","details":{"nodeId":"A"}}"#);
//!
//! let projection = service.snapshot();
//! assert_eq!(projection.nodes[0].id, "A");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod projection;
pub mod service;

pub use config::{ObserverConfig, ReconnectPolicy};
pub use domain::{
    decode_blockchain, decode_blockchain_json, decode_hex, encode_bytes, reconcile, AppliedChange,
    EventLog, LoggedEnvelope, NetworkEvent, ObserverState, ReconcileOutcome, ReplacementCause,
    CANDIDATE_BLOCK_MESSAGE,
};
pub use error::{ObserverError, ObserverResult, ReconcileError};
pub use ports::inbound::ObserverApi;
pub use projection::{Projection, ProjectionSummary};
pub use service::{IngestOutcome, ObserverService};
pub use shared_types::{DecodeError, Envelope};
