//! Benchmarks for frame extraction from raw byte streams.
//!
//! The splitter sits in front of every decoded byte, so its scan must stay
//! cheap at serial line rates and across pathological chunk sizes:
//! - Whole-capture pushes (best case, one scan)
//! - Serial-sized chunks (the realistic case)
//! - Single-byte chunks (worst case for carry handling)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use hedgelink::framing::FrameSplitter;
use hedgelink::test_utils::{
    beacon_map_packet, position_packet, quality_packet, raw_distances_packet, telemetry_packet,
    wire,
};
use std::hint::black_box;

/// A capture resembling steady-state modem output for two hedgehogs.
fn build_capture(repeats: usize) -> Vec<u8> {
    let mut frames = Vec::new();
    for i in 0..repeats {
        let address = 5 + (i % 2) as u8;
        frames.push(position_packet(address, 1200 + i as i32, 3400, 150));
        frames.push(raw_distances_packet(
            address,
            [(1, 2500, 0), (2, 3100, 0), (3, 2900, 1), (4, 3300, 0)],
        ));
        frames.push(quality_packet(address, 90, 0));
        frames.push(telemetry_packet(address, 3700, 0xBC));
        if i % 16 == 0 {
            frames.push(beacon_map_packet(&[
                (1, 0, 0, 2500),
                (2, 5000, 0, 2500),
                (3, 5000, 4000, 2500),
                (4, 0, 4000, 2500),
            ]));
        }
    }
    wire(&frames)
}

fn bench_frame_splitting(c: &mut Criterion) {
    let capture = build_capture(64);

    let mut group = c.benchmark_group("frame_splitting");
    group.throughput(Throughput::Bytes(capture.len() as u64));

    group.bench_function("whole_capture", |b| {
        b.iter(|| {
            let mut splitter = FrameSplitter::new();
            let frames = splitter.push(black_box(&capture));
            black_box(frames)
        })
    });

    for chunk_size in [64usize, 1] {
        group.bench_function(format!("{chunk_size}_byte_chunks"), |b| {
            b.iter(|| {
                let mut splitter = FrameSplitter::new();
                let mut total = 0usize;
                for chunk in capture.chunks(chunk_size) {
                    total += splitter.push(black_box(chunk)).len();
                }
                black_box(total)
            })
        });
    }

    group.finish();
}

fn bench_markerless_scan(c: &mut Criterion) {
    // Garbage without a single marker: pure scan cost plus carry growth.
    let garbage = vec![0xABu8; 16 * 1024];

    let mut group = c.benchmark_group("markerless_scan");
    group.throughput(Throughput::Bytes(garbage.len() as u64));

    group.bench_function("carry_accumulation", |b| {
        b.iter(|| {
            let mut splitter = FrameSplitter::new();
            for chunk in garbage.chunks(256) {
                black_box(splitter.push(black_box(chunk)).len());
            }
            black_box(splitter.carry_len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_frame_splitting, bench_markerless_scan);
criterion_main!(benches);
