//! Per-thread counters, packed into one array or padded to a line each.
//!
//! Every worker only touches its own counter, so both layouts give the
//! same total. The packed layout puts neighbouring counters on one cache
//! line and pays for it in coherence traffic; the padded layout does not.

use core::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use std::thread;

use crossbeam_utils::CachePadded;
use log::{debug, error};

use crate::{
    config::HarnessConfig,
    error::{CountMismatchSnafu, Result, WorkerPanickedSnafu},
    signal::StartSignal,
    stats,
};

/// How the per-thread counters are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLayout {
    /// Contiguous `AtomicU64`s (false sharing).
    Packed,
    /// One `CachePadded<AtomicU64>` per worker.
    Padded,
}

impl CounterLayout {
    /// Human-readable label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Packed => "per-thread counters (packed, false sharing)",
            Self::Padded => "per-thread counters (padded, no false sharing)",
        }
    }
}

/// Outcome of a counter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterReport {
    /// Layout that was measured.
    pub layout: CounterLayout,
    /// Sum over every counter.
    pub total: u64,
    /// Wall time from start signal to all workers joined.
    pub elapsed: Duration,
}

impl fmt::Display for CounterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: total {} in {:.3} ms",
            self.layout.label(),
            self.total,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

/// Storage for one worker's counter.
trait CounterSlot: Sync {
    fn counter(&self) -> &AtomicU64;
}

impl CounterSlot for AtomicU64 {
    fn counter(&self) -> &AtomicU64 {
        self
    }
}

impl CounterSlot for CachePadded<AtomicU64> {
    fn counter(&self) -> &AtomicU64 {
        self
    }
}

/// Run `threads` workers, each adding `increments` to its own counter.
///
/// # Errors
/// [`CountMismatch`](crate::HarnessError::CountMismatch) if the total is
/// not `threads * increments`, plus the errors of
/// [`HarnessConfig::validate`].
pub fn run_counters(config: &HarnessConfig, layout: CounterLayout) -> Result<CounterReport> {
    config.validate()?;

    match layout {
        CounterLayout::Packed => {
            let slots: Vec<AtomicU64> = (0..config.threads).map(|_| AtomicU64::new(0)).collect();
            count(&slots, config, layout)
        }
        CounterLayout::Padded => {
            let slots: Vec<CachePadded<AtomicU64>> = (0..config.threads)
                .map(|_| CachePadded::new(AtomicU64::new(0)))
                .collect();
            count(&slots, config, layout)
        }
    }
}

fn count<S: CounterSlot>(
    slots: &[S],
    config: &HarnessConfig,
    layout: CounterLayout,
) -> Result<CounterReport> {
    debug!(
        "{}: threads={}, increments={}, slot size={} bytes",
        layout.label(),
        config.threads,
        config.increments,
        size_of::<S>()
    );

    let start = StartSignal::new();
    let increments = config.increments;

    let (panicked, elapsed) = thread::scope(|s| {
        let start = &start;
        let workers: Vec<_> = slots
            .iter()
            .map(|slot| {
                s.spawn(move || {
                    start.wait();
                    let counter = slot.counter();
                    for _ in 0..increments {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        stats::time(layout.label(), || {
            start.fire();
            workers
                .into_iter()
                .map(thread::ScopedJoinHandle::join)
                .filter(|joined| joined.is_err())
                .count()
        })
    });

    if panicked > 0 {
        return WorkerPanickedSnafu { role: "counter" }.fail();
    }

    let total: u64 = slots
        .iter()
        .map(|slot| slot.counter().load(Ordering::Relaxed))
        .sum();
    // validate() rules out overflow here.
    let expected = config.threads as u64 * increments;
    if total != expected {
        error!("{}: expected {expected}, got {total}", layout.label());
        return CountMismatchSnafu {
            expected,
            actual: total,
        }
        .fail();
    }

    Ok(CounterReport {
        layout,
        total,
        elapsed,
    })
}
