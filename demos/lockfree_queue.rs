//! Ten million values through a 1024-slot queue, verified in order.
//!
//! Run with: `cargo run --release --example lockfree_queue`

use log::{Level, LevelFilter, Log, Metadata, Record};
use spsc_ring::{HarnessConfig, SpscQueue, run_ordered};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
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
        log::set_max_level(LevelFilter::Info);
    }

    println!("queue layout:\n{}", SpscQueue::<u64, 1024>::layout());

    let config = HarnessConfig::default();
    let report = run_ordered::<1024>(&config)?;

    println!("{report}");
    println!("all {} values arrived in order", report.messages);
    Ok(())
}
