//! # Session-Level Tests
//!
//! Behaviour across connection epochs and under hostile input.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use observer_core::{
        IngestOutcome, ObserverApi, ObserverConfig, ObserverService, ReconnectPolicy,
    };
    use tokio::time::timeout;

    use crate::fixtures::*;

    fn service(policy: ReconnectPolicy, capacity: usize) -> ObserverService {
        ObserverService::new(ObserverConfig {
            reconnect_policy: policy,
            event_log_capacity: capacity,
            ..ObserverConfig::default()
        })
    }

    // =============================================================================
    // RECONNECT POLICIES
    // =============================================================================

    #[test]
    fn test_continue_folds_epochs_together() {
        let service = service(ReconnectPolicy::Continue, 0);
        service.begin_epoch();
        service.ingest(&spawned_node("A"));
        service.ingest(&created_wallet("w-1"));

        service.begin_epoch();
        // The simulator replays spawns after a restart.
        assert!(!service.ingest(&spawned_node("A")).is_applied());
        service.ingest(&routing_info("A", 4));

        let snapshot = service.snapshot();
        assert_eq!(snapshot.epoch, 2);
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.wallets.len(), 1);
        assert_eq!(snapshot.node("A").unwrap().neighbour_count, 4);
        assert_eq!(snapshot.event_log.len(), 4);
    }

    #[test]
    fn test_reset_starts_each_epoch_empty() {
        let service = service(ReconnectPolicy::Reset, 0);
        service.begin_epoch();
        service.ingest(&spawned_node("A"));
        service.ingest(&created_blockchain("A", 3));

        service.begin_epoch();
        let snapshot = service.snapshot();
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.wallets.is_empty());
        assert!(snapshot.event_log.is_empty());

        service.ingest(&spawned_node("B"));
        let snapshot = service.snapshot();
        let ids: Vec<_> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["B"]);
        // Sequence numbers continue across the reset.
        assert_eq!(snapshot.event_log[0].seq, 2);
        assert_eq!(snapshot.event_log[0].epoch, 2);
    }

    #[test]
    fn test_first_epoch_never_resets() {
        let service = service(ReconnectPolicy::Reset, 0);
        service.ingest(&spawned_node("early"));
        service.begin_epoch();
        assert_eq!(service.snapshot().nodes.len(), 1);
    }

    // =============================================================================
    // MALFORMED INPUT
    // =============================================================================

    #[test]
    fn test_malformed_messages_leave_state_identical() {
        let service = service(ReconnectPolicy::Continue, 0);
        service.ingest(&spawned_node("A"));
        service.ingest(&created_blockchain("A", 2));
        let before = serde_json::to_string(&service.snapshot().nodes).unwrap();

        let garbage = [
            "",
            "null",
            "[]",
            "{",
            r#"{"nodeId":"A"}"#,
            r#"{"nodeId":1,"eventId":"SpawnedNode","details":{}}"#,
            r#"{"nodeId":"A","eventId":"UpdatedRoutingInfo","details":7}"#,
        ];
        for raw in garbage {
            assert!(
                matches!(service.ingest(raw), IngestOutcome::Discarded(_)),
                "{raw:?} should be discarded"
            );
        }

        let after = serde_json::to_string(&service.snapshot().nodes).unwrap();
        assert_eq!(before, after);
        assert_eq!(service.snapshot().event_log.len(), 2);
    }

    #[test]
    fn test_invalid_payload_keeps_previous_chain() {
        let service = service(ReconnectPolicy::Continue, 0);
        service.ingest(&spawned_node("A"));
        service.ingest(&created_blockchain("A", 2));

        // Well-formed envelope, but the chain is missing its blocks.
        let broken = r#"{"nodeId":"A","eventId":"CreatedBlockchain","details":{"rawBlockchainData":{"length":9}}}"#;
        assert!(matches!(service.ingest(broken), IngestOutcome::Ignored(_)));

        let snapshot = service.snapshot();
        assert_eq!(snapshot.node("A").unwrap().blockchain.length, 2);
        assert_eq!(snapshot.event_log.len(), 3);
    }

    #[test]
    fn test_unknown_events_are_logged_not_applied() {
        let service = service(ReconnectPolicy::Continue, 0);
        service.ingest(&spawned_node("A"));
        let outcome = service.ingest(r#"{"nodeId":"A","eventId":"MinedBlock","details":{}}"#);
        assert!(matches!(outcome, IngestOutcome::Ignored(_)));
        assert_eq!(service.snapshot().events_for("A").count(), 1);
    }

    // =============================================================================
    // BOUNDED HISTORY
    // =============================================================================

    #[test]
    fn test_event_log_is_bounded() {
        let service = service(ReconnectPolicy::Continue, 8);
        service.ingest(&spawned_node("A"));
        for n in 0..20 {
            service.ingest(&routing_info("A", n));
        }

        let snapshot = service.snapshot();
        assert_eq!(snapshot.event_log.len(), 8);
        assert_eq!(snapshot.evicted_events, 13);
        assert_eq!(snapshot.event_log.first().unwrap().seq, 13);
        // State is unaffected by eviction.
        assert_eq!(snapshot.node("A").unwrap().neighbour_count, 19);
    }

    // =============================================================================
    // CONCURRENT READERS
    // =============================================================================

    #[tokio::test]
    async fn test_reader_task_follows_revisions() {
        let observer: Arc<dyn ObserverApi> = Arc::new(service(ReconnectPolicy::Continue, 0));
        let mut revisions = observer.subscribe();

        let reader = {
            let observer = Arc::clone(&observer);
            tokio::spawn(async move {
                loop {
                    revisions.changed().await.unwrap();
                    let snapshot = observer.snapshot();
                    if snapshot.nodes.len() == 3 {
                        return snapshot;
                    }
                }
            })
        };

        let writer = {
            let observer = Arc::clone(&observer);
            tokio::spawn(async move {
                observer.begin_epoch();
                for id in ["A", "B", "C"] {
                    observer.ingest(&spawned_node(id));
                    tokio::task::yield_now().await;
                }
            })
        };

        writer.await.unwrap();
        let snapshot = timeout(Duration::from_secs(5), reader)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.revision, 4);
        assert_eq!(snapshot.epoch, 1);
    }
}
