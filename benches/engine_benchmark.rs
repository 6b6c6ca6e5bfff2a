//! Benchmarks for the movement engine - the per-turn hot path.

#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use chicane::game::{enumerate_targets, resolve_movement};
use chicane::race::{generate_track, standard_plan};

fn bench_resolve_movement(c: &mut Criterion) {
    let track = generate_track(2, &standard_plan()).expect("valid plan");
    let start = track.start_nodes()[0];
    let forbidden = BTreeSet::new();

    c.bench_function("resolve_movement_d20", |b| {
        b.iter(|| {
            let reached = resolve_movement(
                black_box(&track),
                black_box(start),
                black_box(20),
                black_box(&forbidden),
                true,
                0,
                false,
            );
            black_box(reached)
        });
    });
}

fn bench_enumerate_targets(c: &mut Criterion) {
    let track = generate_track(2, &standard_plan()).expect("valid plan");
    let start = track.start_nodes()[0];
    let forbidden = BTreeSet::new();

    c.bench_function("enumerate_targets_roll30", |b| {
        b.iter(|| {
            let options = enumerate_targets(
                black_box(&track),
                black_box(start),
                black_box(30),
                black_box(18),
                0,
                false,
                black_box(&forbidden),
            );
            black_box(options)
        });
    });
}

criterion_group!(benches, bench_resolve_movement, bench_enumerate_targets);
criterion_main!(benches);
