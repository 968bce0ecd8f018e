//! Glue between the transport and the observer core.

use std::sync::Arc;

use observer_core::{AppliedChange, IngestOutcome, ObserverApi, ProjectionSummary};
use observer_telemetry::{log_event, log_node_event};
use tracing::info;

use crate::ws::TransportEvent;

/// Application state: the observer plus connection bookkeeping.
pub struct App {
    observer: Arc<dyn ObserverApi>,

    /// Whether the transport currently holds an open connection.
    pub connected: bool,

    /// Epoch announced by the most recent connection.
    pub epoch: u64,

    /// Raw messages received over all connections.
    pub messages_received: u64,

    /// Raw messages that were not valid envelopes.
    pub messages_discarded: u64,

    /// Last transport error, if any.
    pub last_error: Option<String>,
}

impl App {
    pub fn new(observer: Arc<dyn ObserverApi>) -> Self {
        Self {
            observer,
            connected: false,
            epoch: 0,
            messages_received: 0,
            messages_discarded: 0,
            last_error: None,
        }
    }

    pub fn observer(&self) -> &dyn ObserverApi {
        self.observer.as_ref()
    }

    /// Handle one transport event.
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                self.connected = true;
                self.epoch = self.observer.begin_epoch();
            }
            TransportEvent::Disconnected => {
                if self.connected {
                    log_event!(info, "transport", "Observer disconnected", epoch = self.epoch);
                }
                self.connected = false;
            }
            TransportEvent::Message(raw) => {
                self.messages_received += 1;
                match self.observer.ingest(&raw) {
                    IngestOutcome::Applied(AppliedChange::NodeSpawned { node_id }) => {
                        log_node_event!(info, "observer", "Node discovered", node_id);
                    }
                    IngestOutcome::Discarded(_) => self.messages_discarded += 1,
                    _ => {}
                }
            }
            TransportEvent::Error(msg) => {
                log_event!(warn, "transport", "Transport error", error = %msg);
                self.last_error = Some(msg);
            }
        }
    }

    /// Log the headline numbers at info level.
    pub fn log_summary(&self) -> ProjectionSummary {
        let summary = self.observer.summary();
        let (longest_node, longest_length) = match &summary.longest_chain {
            Some((node, length)) => (node.as_str(), *length),
            None => ("-", 0),
        };
        info!(
            connected = self.connected,
            epoch = summary.epoch,
            nodes = summary.node_count,
            wallets = summary.wallet_count,
            total_blocks = summary.total_blocks,
            longest_node,
            longest_length,
            logged_events = summary.logged_events,
            discarded = self.messages_discarded,
            "Network summary"
        );
        summary
    }
}
