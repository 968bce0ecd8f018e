//! WebSocket transport for the simulator's event broadcast.

mod client;

pub use client::{TransportEvent, WsClient};
