//! # Shared Types Crate
//!
//! This crate contains the wire shapes emitted by the simulated blockchain
//! network, the decoded `Envelope`, and the canonical view model that the
//! observer exposes to presentation layers.
//!
//! ## Design Principles
//!
//! - **Two models, one direction**: `wire` types mirror the byte-array JSON the
//!   simulator broadcasts; `entities` hold the hex-string views. Conversion
//!   lives in `observer-core`, never here.
//! - **Envelope Authority**: the envelope's `nodeId` is the only scope used for
//!   dispatch. Payload ids (e.g. `details.nodeId` on `SpawnedNode`) name the
//!   entity being created, not the sender.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod wire;

pub use entities::*;
pub use envelope::{Envelope, EventScope, MAIN_SCOPE};
pub use errors::*;
pub use wire::*;
