//! # End-to-End Observer Tests
//!
//! Raw simulator messages go in through `ObserverService::ingest`; assertions
//! are made on the resulting `Projection` only.
//!
//! - `scenarios`: the reference message sequences and their projections
//! - `session`: connection epochs, malformed input, bounded history

pub mod scenarios;
pub mod session;
