//! # Observer Pipeline Benchmarks
//!
//! | Stage | Input |
//! |-------|-------|
//! | Envelope decode | Routing update, 100-block chain |
//! | Block decode | 10 / 100 / 1000 blocks |
//! | Ingest | Spawn + routing stream, chain replacement |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use observer_core::{decode_blockchain_json, ObserverConfig, ObserverService};
use observer_tests::fixtures::{created_blockchain, raw_chain, routing_info, spawned_node};
use shared_types::Envelope;

fn bench_envelope_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-decode");

    let routing = routing_info("node-1", 8);
    group.bench_function("routing_update", |b| {
        b.iter(|| black_box(Envelope::decode(black_box(&routing)).is_ok()))
    });

    let chain = created_blockchain("node-1", 100);
    group.throughput(Throughput::Bytes(chain.len() as u64));
    group.bench_function("chain_100_blocks", |b| {
        b.iter(|| black_box(Envelope::decode(black_box(&chain)).is_ok()))
    });

    group.finish();
}

fn bench_block_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("block-decode");

    for size in [10u64, 100, 1000] {
        let json = raw_chain(size).to_string();
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("decode_blockchain", size), &json, |b, json| {
            b.iter(|| black_box(decode_blockchain_json(json).map(|view| view.blocks.len())))
        });
    }

    group.finish();
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    let nodes: Vec<String> = (0..100).map(|i| format!("node-{i}")).collect();
    let spawns: Vec<String> = nodes.iter().map(|id| spawned_node(id)).collect();
    let routing: Vec<String> = nodes.iter().map(|id| routing_info(id, 5)).collect();

    group.throughput(Throughput::Elements((spawns.len() + routing.len()) as u64));
    group.bench_function("spawn_then_route_100_nodes", |b| {
        b.iter(|| {
            let service = ObserverService::new(ObserverConfig::default());
            for raw in spawns.iter().chain(routing.iter()) {
                service.ingest(raw);
            }
            black_box(service.summary().node_count)
        })
    });

    let service = ObserverService::new(ObserverConfig {
        event_log_capacity: 64,
        ..ObserverConfig::default()
    });
    service.ingest(&spawned_node("node-0"));
    let replacement = created_blockchain("node-0", 100);
    group.throughput(Throughput::Elements(1));
    group.bench_function("replace_100_block_chain", |b| {
        b.iter(|| black_box(service.ingest(black_box(&replacement)).is_applied()))
    });

    group.finish();
}

criterion_group!(benches, bench_envelope_decode, bench_block_decode, bench_ingest);
criterion_main!(benches);
