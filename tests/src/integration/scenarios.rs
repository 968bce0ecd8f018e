//! # Reference Scenarios
//!
//! The canonical spawn → routing → candidate block → wallet sequence, plus
//! the ordering and replacement properties the projection must hold.

#[cfg(test)]
mod tests {
    use observer_core::{IngestOutcome, ObserverService, ReconcileError, CANDIDATE_BLOCK_MESSAGE};
    use serde_json::json;

    use crate::fixtures::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn ingest_all(service: &ObserverService, messages: &[String]) {
        for raw in messages {
            service.ingest(raw);
        }
    }

    fn node_json(service: &ObserverService, id: &str) -> serde_json::Value {
        let snapshot = service.snapshot();
        let node = snapshot.node(id).cloned().expect("node present");
        serde_json::to_value(node).unwrap()
    }

    // =============================================================================
    // CANONICAL SEQUENCE
    // =============================================================================

    #[test]
    fn test_spawn_yields_empty_node() {
        let service = ObserverService::default();
        service.ingest(
            r#"{"nodeId":"Main","eventId":"SpawnedNode","details":{"nodeId":"node-1"}}"#,
        );

        let snapshot = service.snapshot();
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(
            node_json(&service, "node-1"),
            json!({
                "id": "node-1",
                "neighbourCount": 0,
                "messages": [],
                "blockchain": { "length": 0, "blocks": [] }
            })
        );
    }

    #[test]
    fn test_routing_update_sets_neighbour_count() {
        let service = ObserverService::default();
        service.ingest(&spawned_node("node-1"));
        service.ingest(
            r#"{"nodeId":"node-1","eventId":"UpdatedRoutingInfo","details":{"neighbourCount":3}}"#,
        );

        assert_eq!(service.snapshot().node("node-1").unwrap().neighbour_count, 3);
    }

    #[test]
    fn test_candidate_block_appends_message_only() {
        let service = ObserverService::default();
        ingest_all(
            &service,
            &[
                spawned_node("node-1"),
                routing_info("node-1", 3),
                created_blockchain("node-1", 2),
            ],
        );
        let chain_before = service.snapshot().node("node-1").unwrap().blockchain.clone();

        service.ingest(r#"{"nodeId":"node-1","eventId":"ReceivedNewBlock","details":{}}"#);

        let snapshot = service.snapshot();
        let node = snapshot.node("node-1").unwrap();
        assert_eq!(node.messages, vec![CANDIDATE_BLOCK_MESSAGE.to_string()]);
        assert_eq!(node.blockchain, chain_before);
        assert_eq!(node.neighbour_count, 3);
    }

    #[test]
    fn test_created_wallet_has_zero_balance() {
        let service = ObserverService::default();
        service.ingest(
            r#"{"nodeId":"Main","eventId":"CreatedWallet","details":{"walletAddress":"0xABC"}}"#,
        );

        let wallets = serde_json::to_value(&service.snapshot().wallets).unwrap();
        assert_eq!(wallets, json!([{ "id": "0xABC", "balance": 0.0 }]));
    }

    #[test]
    fn test_new_block_without_details() {
        let service = ObserverService::default();
        service.ingest(&spawned_node("node-1"));
        assert!(service.ingest(&new_block("node-1")).is_applied());
        assert_eq!(service.snapshot().node("node-1").unwrap().messages.len(), 1);
    }

    // =============================================================================
    // ORDERING AND REPLACEMENT
    // =============================================================================

    #[test]
    fn test_nodes_keep_first_seen_order() {
        let service = ObserverService::default();
        ingest_all(
            &service,
            &[
                spawned_node("B"),
                spawned_node("A"),
                routing_info("A", 1),
                spawned_node("C"),
                created_blockchain("B", 1),
            ],
        );

        let ids: Vec<_> = service
            .snapshot()
            .nodes
            .iter()
            .map(|n| n.id.clone())
            .collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_blockchain_replacement_is_idempotent() {
        let service = ObserverService::default();
        service.ingest(&spawned_node("A"));
        let raw = created_blockchain("A", 3);

        service.ingest(&raw);
        let first = service.snapshot().node("A").unwrap().blockchain.clone();
        service.ingest(&raw);
        let second = service.snapshot().node("A").unwrap().blockchain.clone();

        assert_eq!(first, second);
        assert_eq!(first.length, 3);
        assert_eq!(first.blocks.len(), 3);
    }

    #[test]
    fn test_fresher_chain_replaces_wholesale() {
        let service = ObserverService::default();
        ingest_all(
            &service,
            &[
                spawned_node("A"),
                created_blockchain("A", 4),
                fresher_blockchain("A", 4, 2),
            ],
        );

        let snapshot = service.snapshot();
        let node = snapshot.node("A").unwrap();
        // Shorter replacement is taken as-is; nothing is merged.
        assert_eq!(node.blockchain.length, 2);
        assert_eq!(node.blockchain.blocks.len(), 2);
        assert_eq!(node.tip_hash(), Some(block_hash_hex(1).as_str()));
    }

    #[test]
    fn test_block_fields_decode_to_hex() {
        let service = ObserverService::default();
        ingest_all(&service, &[spawned_node("A"), created_blockchain("A", 1)]);

        let snapshot = service.snapshot();
        let block = &snapshot.node("A").unwrap().blockchain.blocks[0];
        assert_eq!(block.hash, block_hash_hex(0));
        assert_eq!(block.proof_of_work, 1u128 << 60);

        let tx = &block.transactions[0];
        assert_eq!(tx.id, "coinbase-0");
        assert_eq!(tx.inputs[0].out, -1);
        assert_eq!(tx.inputs[0].id, "");
        assert_eq!(tx.outputs[0].public_key_hash, "deadbeef");
    }

    #[test]
    fn test_events_for_unseen_nodes_are_reported() {
        let service = ObserverService::default();
        service.ingest(&spawned_node("A"));

        for raw in [
            routing_info("ghost", 2),
            new_block("ghost"),
            created_blockchain("ghost", 1),
        ] {
            assert!(matches!(
                service.ingest(&raw),
                IngestOutcome::Ignored(ReconcileError::UnresolvedNode { .. })
            ));
        }

        let snapshot = service.snapshot();
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.node("A").unwrap().neighbour_count, 0);
        assert_eq!(snapshot.events_for("ghost").count(), 3);
    }

    #[test]
    fn test_summary_tracks_longest_chain() {
        let service = ObserverService::default();
        ingest_all(
            &service,
            &[
                spawned_node("A"),
                spawned_node("B"),
                created_wallet("w-1"),
                created_blockchain("A", 2),
                created_blockchain("B", 5),
            ],
        );

        let summary = service.summary();
        assert_eq!(summary.node_count, 2);
        assert_eq!(summary.wallet_count, 1);
        assert_eq!(summary.total_blocks, 7);
        assert_eq!(summary.longest_chain, Some(("B".to_string(), 5)));
        assert_eq!(summary, service.snapshot().summary());
    }
}
