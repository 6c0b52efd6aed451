//! Counter layouts and a checksummed queue run, repeated and summarised.
//!
//! Run with: `cargo run --release --example summary`

use log::{Level, LevelFilter, Log, Metadata, Record};
use spsc_ring::{CounterLayout, HarnessConfig, Stats, run_checksum, run_counters};

const ROUNDS: usize = 5;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> Result<(), spsc_ring::HarnessError> {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Warn);
    }

    let config = HarnessConfig::default();

    for layout in [CounterLayout::Packed, CounterLayout::Padded] {
        let mut stats = Stats::new();
        for _ in 0..ROUNDS {
            stats.add_duration(run_counters(&config, layout)?.elapsed);
        }
        println!("{}", stats.display(layout.label()));
    }

    let mut stats = Stats::new();
    let mut throughput = 0.0;
    for _ in 0..ROUNDS {
        let report = run_checksum::<1024>(&config)?;
        stats.add_duration(report.elapsed);
        throughput += report.throughput();
    }
    println!("{}", stats.display("SPSC checksum run"));
    println!(
        "mean throughput: {:.2} million messages/sec",
        throughput / ROUNDS as f64 / 1e6
    );
    Ok(())
}
