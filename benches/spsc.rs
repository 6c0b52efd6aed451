//! SPSC queue benchmarks.
//!
//! `single_thread` measures the raw enqueue/dequeue path on one core.
//! `cross_thread` moves a batch from a producer thread to a consumer thread
//! per iteration, timed with `iter_custom` so thread startup is excluded.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use spsc_ring::SpscQueue;
use std::hint::black_box;
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

const BATCH: u64 = 10_000;

fn single_thread<const N: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread");
    group.throughput(Throughput::Elements(BATCH));

    group.bench_function(BenchmarkId::new("fill_drain", N), |b| {
        let mut queue = SpscQueue::<u64, N>::new();
        b.iter(|| {
            let mut sent = 0u64;
            while sent < BATCH {
                while sent < BATCH && queue.try_enqueue(black_box(sent)).is_ok() {
                    sent += 1;
                }
                while let Some(v) = queue.try_dequeue() {
                    black_box(v);
                }
            }
        });
    });

    group.finish();
}

fn transfer<const N: usize>(iters: u64) -> Duration {
    let mut total = Duration::ZERO;
    for _ in 0..iters {
        let mut queue = SpscQueue::<u64, N>::new();
        let (producer, consumer) = queue.split();
        let ready = Barrier::new(3);

        let elapsed = thread::scope(|s| {
            let ready = &ready;
            s.spawn(move || {
                ready.wait();
                for i in 0..BATCH {
                    let mut value = i;
                    while let Err(back) = producer.try_enqueue(value) {
                        value = back;
                        std::hint::spin_loop();
                    }
                }
            });
            let reader = s.spawn(move || {
                ready.wait();
                let mut received = 0u64;
                while received < BATCH {
                    if let Some(v) = consumer.try_dequeue() {
                        black_box(v);
                        received += 1;
                    } else {
                        std::hint::spin_loop();
                    }
                }
            });

            ready.wait();
            let start = Instant::now();
            reader.join().expect("consumer panicked");
            start.elapsed()
        });
        total += elapsed;
    }
    total
}

fn cross_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_thread");
    group.throughput(Throughput::Elements(BATCH));

    group.bench_function(BenchmarkId::new("transfer", 2), |b| {
        b.iter_custom(transfer::<2>);
    });
    group.bench_function(BenchmarkId::new("transfer", 64), |b| {
        b.iter_custom(transfer::<64>);
    });
    group.bench_function(BenchmarkId::new("transfer", 1024), |b| {
        b.iter_custom(transfer::<1024>);
    });

    group.finish();
}

criterion_group!(
    benches,
    single_thread::<64>,
    single_thread::<1024>,
    cross_thread
);
criterion_main!(benches);
