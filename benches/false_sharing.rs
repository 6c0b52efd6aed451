//! Packed vs. cache-line padded per-thread counters.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use spsc_ring::{CounterLayout, HarnessConfig, run_counters};

fn counters(c: &mut Criterion) {
    let config = HarnessConfig::default()
        .with_threads(4)
        .with_increments(100_000);

    let mut group = c.benchmark_group("false_sharing");
    group.sample_size(20);
    group.throughput(Throughput::Elements(
        config.threads as u64 * config.increments,
    ));

    for layout in [CounterLayout::Packed, CounterLayout::Padded] {
        group.bench_with_input(
            BenchmarkId::new("counters", format!("{layout:?}")),
            &layout,
            |b, &layout| {
                b.iter(|| run_counters(&config, layout).map(|report| report.total));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, counters);
criterion_main!(benches);
