//! Criterion benchmarks for the queue's core operation mix
//!
//! ```bash
//! cargo bench --bench queue_perf
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fibonacci_pqueue::PQueue;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Pseudo-random but deterministic keys, so runs are comparable.
fn keys(n: usize) -> Vec<u64> {
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            state >> 16
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in SIZES {
        let values = keys(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let mut queue = PQueue::new();
                for &key in values {
                    queue.insert(black_box(key));
                }
                queue
            })
        });
    }
    group.finish();
}

fn bench_build_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_and_drain");
    for n in SIZES {
        let values = keys(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let mut queue = PQueue::from_elements(values.iter().copied());
                let mut last = 0;
                while let Ok(key) = queue.extract_min() {
                    last = black_box(key);
                }
                last
            })
        });
    }
    group.finish();
}

fn bench_merge_then_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_then_drain");
    for n in SIZES {
        let values = keys(n);
        let chunks: Vec<&[u64]> = values.chunks(64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &chunks, |b, chunks| {
            b.iter(|| {
                let mut queue = PQueue::new();
                for chunk in chunks {
                    queue.merge(PQueue::from_elements(chunk.iter().copied()));
                }
                let mut last = 0;
                while let Ok(key) = queue.extract_min() {
                    last = black_box(key);
                }
                last
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_build_and_drain,
    bench_merge_then_drain
);
criterion_main!(benches);
