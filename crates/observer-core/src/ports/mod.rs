//! Port definitions (Hexagonal Architecture)

pub mod inbound;

pub use inbound::ObserverApi;
