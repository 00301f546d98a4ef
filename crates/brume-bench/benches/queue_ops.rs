//! Criterion micro-benchmarks for the indexed priority queue.

use brume_queue::{DynamicPriorityQueue, EventScheduler, MinOrder, Serial};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..1_000_000)).collect()
}

/// Benchmark: push 10K random keys, then pop them all.
fn bench_push_pop_10k(c: &mut Criterion) {
    let input = keys(10_000, 1);

    c.bench_function("push_pop_10k", |b| {
        b.iter(|| {
            let mut q = DynamicPriorityQueue::with_comparator(MinOrder);
            for &k in &input {
                q.push(k);
            }
            while let Some(k) = q.pop_top() {
                black_box(k);
            }
        });
    });
}

/// Benchmark: 10K in-place key updates on a 10K-item queue.
fn bench_update_10k(c: &mut Criterion) {
    let input = keys(10_000, 2);
    let updates = keys(10_000, 3);

    c.bench_function("update_10k", |b| {
        b.iter_batched(
            || {
                let mut q = DynamicPriorityQueue::new();
                let serials: Vec<Serial> = input.iter().map(|&k| q.push(k)).collect();
                (q, serials)
            },
            |(mut q, serials)| {
                for (serial, &k) in serials.iter().zip(&updates) {
                    q.replace(*serial, k).unwrap();
                }
                black_box(q.peek_top().copied())
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: remove half of a 10K-item queue by serial.
fn bench_remove_by_serial_5k(c: &mut Criterion) {
    let input = keys(10_000, 4);

    c.bench_function("remove_by_serial_5k", |b| {
        b.iter_batched(
            || {
                let mut q = DynamicPriorityQueue::new();
                let serials: Vec<Serial> = input.iter().map(|&k| q.push(k)).collect();
                (q, serials)
            },
            |(mut q, serials)| {
                for serial in serials.iter().step_by(2) {
                    black_box(q.pop_item(*serial).unwrap());
                }
                q
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: reschedule-heavy event loop, 1K events, 10K pops.
fn bench_scheduler_churn(c: &mut Criterion) {
    let offsets: Vec<f64> = keys(1_000, 5).iter().map(|&k| k as f64 * 1e-6).collect();

    c.bench_function("scheduler_churn_1k", |b| {
        b.iter(|| {
            let mut s = EventScheduler::new();
            for (i, &dt) in offsets.iter().enumerate() {
                s.add(dt, i);
            }
            for _ in 0..10_000 {
                if let Some((_, t, i)) = s.pop() {
                    s.add(t + offsets[i] + 1e-6, i);
                }
            }
            black_box(s.next_time())
        });
    });
}

criterion_group!(
    benches,
    bench_push_pop_10k,
    bench_update_10k,
    bench_remove_by_serial_5k,
    bench_scheduler_churn
);
criterion_main!(benches);
