//! Benchmarks for the full decode pipeline.
//!
//! Measures chunk-to-event throughput with the store in the loop, plus the
//! isolated per-packet decode cost for each packet kind.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use hedgelink::test_utils::{
    beacon_map_packet, position_packet, quality_packet, raw_distances_packet, telemetry_packet,
    wire,
};
use hedgelink::{DecodePipeline, DeviceStateStore, TelemetryEvent};
use std::hint::black_box;

fn build_capture(repeats: usize) -> Vec<u8> {
    let mut frames = Vec::new();
    for i in 0..repeats {
        let address = 5 + (i % 4) as u8;
        frames.push(position_packet(address, i as i32 * 3, 2000, 150));
        frames.push(quality_packet(address, 85, 0));
        frames.push(telemetry_packet(address, 3650, 0xBC));
    }
    wire(&frames)
}

fn bench_pipeline_throughput(c: &mut Criterion) {
    let capture = build_capture(128);

    let mut group = c.benchmark_group("pipeline_throughput");
    group.throughput(Throughput::Bytes(capture.len() as u64));

    for chunk_size in [capture.len(), 64] {
        let label = if chunk_size == capture.len() { "whole_capture" } else { "64_byte_chunks" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut pipeline = DecodePipeline::new();
                let mut store = DeviceStateStore::new();
                let mut events = 0usize;
                for chunk in capture.chunks(chunk_size) {
                    events += pipeline.feed(black_box(chunk), &mut store).len();
                }
                black_box((events, store))
            })
        });
    }

    group.finish();
}

fn bench_single_packet_decode(c: &mut Criterion) {
    let frames = [
        ("position", position_packet(5, 1200, 3400, 150)),
        ("beacon_map", beacon_map_packet(&[
            (1, 0, 0, 2500),
            (2, 5000, 0, 2500),
            (3, 5000, 4000, 2500),
            (4, 0, 4000, 2500),
        ])),
        ("raw_distances", raw_distances_packet(5, [(1, 2500, 0), (2, 3100, 0), (3, 2900, 1), (4, 3300, 0)])),
        ("quality", quality_packet(5, 90, 0)),
        ("telemetry", telemetry_packet(5, 3700, 0xBC)),
    ];

    let mut group = c.benchmark_group("single_packet_decode");
    for (name, frame) in &frames {
        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_function(*name, |b| {
            b.iter(|| {
                let event = TelemetryEvent::decode(black_box(frame));
                black_box(event)
            })
        });
    }
    group.finish();
}

fn bench_store_apply(c: &mut Criterion) {
    let event = TelemetryEvent::decode(&position_packet(5, 1200, 3400, 150))
        .expect("decode")
        .expect("known packet kind");

    c.bench_function("store_apply_position", |b| {
        let mut store = DeviceStateStore::new();
        b.iter(|| {
            store.apply(black_box(&event));
            black_box(store.position(5));
        })
    });
}

criterion_group!(
    benches,
    bench_pipeline_throughput,
    bench_single_packet_decode,
    bench_store_apply
);
criterion_main!(benches);
