//! # Observer Metrics
//!
//! Prometheus metrics for the decode/reconcile pipeline.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! observer-core = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `observer_envelopes_decoded_total` - Counter of well-formed envelopes
//! - `observer_decode_failures_total` - Counter of discarded raw messages
//! - `observer_events_applied_total` - Counter of state changes (by event)
//! - `observer_events_ignored_total` - Counter of no-op envelopes (by reason)
//! - `observer_nodes` - Gauge of known nodes
//! - `observer_wallets` - Gauge of known wallets
//! - `observer_event_log_len` - Gauge of envelopes held in the log

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_gauge, register_int_counter, CounterVec, Gauge, IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref ENVELOPES_DECODED: IntCounter = register_int_counter!(
        "observer_envelopes_decoded_total",
        "Total number of well-formed envelopes"
    )
    .expect("Failed to create ENVELOPES_DECODED metric");

    pub static ref DECODE_FAILURES: IntCounter = register_int_counter!(
        "observer_decode_failures_total",
        "Total number of raw messages discarded as malformed"
    )
    .expect("Failed to create DECODE_FAILURES metric");

    /// State changes, labeled by event id
    pub static ref EVENTS_APPLIED: CounterVec = register_counter_vec!(
        "observer_events_applied_total",
        "Total number of envelopes that changed state",
        &["event"]
    )
    .expect("Failed to create EVENTS_APPLIED metric");

    /// No-op envelopes, labeled by reason
    pub static ref EVENTS_IGNORED: CounterVec = register_counter_vec!(
        "observer_events_ignored_total",
        "Total number of envelopes that left state unchanged",
        &["reason"]
    )
    .expect("Failed to create EVENTS_IGNORED metric");

    pub static ref NODES: Gauge = register_gauge!(
        "observer_nodes",
        "Number of nodes discovered"
    )
    .expect("Failed to create NODES metric");

    pub static ref WALLETS: Gauge = register_gauge!(
        "observer_wallets",
        "Number of wallets announced"
    )
    .expect("Failed to create WALLETS metric");

    pub static ref EVENT_LOG_LEN: Gauge = register_gauge!(
        "observer_event_log_len",
        "Number of envelopes held in the event log"
    )
    .expect("Failed to create EVENT_LOG_LEN metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_envelope_decoded() {
    ENVELOPES_DECODED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_decode_failure() {
    DECODE_FAILURES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_event_applied(event: &str) {
    EVENTS_APPLIED.with_label_values(&[event]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_event_ignored(reason: &str) {
    EVENTS_IGNORED.with_label_values(&[reason]).inc();
}

/// Update the size gauges after a transition
#[cfg(feature = "metrics")]
pub fn set_state_size(nodes: usize, wallets: usize, log_len: usize) {
    NODES.set(nodes as f64);
    WALLETS.set(wallets as f64);
    EVENT_LOG_LEN.set(log_len as f64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_envelope_decoded() {}

#[cfg(not(feature = "metrics"))]
pub fn record_decode_failure() {}

#[cfg(not(feature = "metrics"))]
pub fn record_event_applied(_event: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_event_ignored(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_state_size(_nodes: usize, _wallets: usize, _log_len: usize) {}
