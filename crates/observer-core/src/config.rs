//! Configuration for the observer core

use serde::{Deserialize, Serialize};

/// What to do with accumulated state when the transport starts a new
/// connection epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconnectPolicy {
    /// Fold the new connection's events into the existing state.
    #[default]
    Continue,
    /// Clear nodes, wallets and the event log before the new epoch.
    Reset,
}

impl std::str::FromStr for ReconnectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(ReconnectPolicy::Continue),
            "reset" => Ok(ReconnectPolicy::Reset),
            other => Err(format!("unknown reconnect policy: {other}")),
        }
    }
}

/// Observer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Envelopes kept in the event log (0 = unbounded)
    pub event_log_capacity: usize,
    /// Policy applied when a new connection epoch begins
    pub reconnect_policy: ReconnectPolicy,
    /// Longest raw payload echoed in decode-failure warnings
    pub max_logged_payload_chars: usize,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            event_log_capacity: 10_000,
            reconnect_policy: ReconnectPolicy::Continue,
            max_logged_payload_chars: 256,
        }
    }
}
