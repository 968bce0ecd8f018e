//! Domain module for the observer
//!
//! ## Core Modules
//! - hex: byte sequence codec
//! - block_decoder: wire chain -> hex-encoded view
//! - event: envelope -> closed event union
//! - state: accumulated nodes/wallets and the reducer
//! - event_log: bounded envelope history

pub mod block_decoder;
pub mod event;
pub mod event_log;
pub mod hex;
pub mod state;

pub use block_decoder::{decode_block, decode_blockchain, decode_blockchain_json};
pub use event::{event_ids, NetworkEvent, ReplacementCause};
pub use event_log::{EventLog, LoggedEnvelope};
pub use hex::{decode_hex, encode_bytes};
pub use state::{reconcile, AppliedChange, ObserverState, ReconcileOutcome, CANDIDATE_BLOCK_MESSAGE};
