//! Producer/consumer runs over one [`SpscQueue`].
//!
//! Each run owns its own context: a start signal both workers wait on
//! and an abort flag that stops the other side when one fails. The consumer
//! is spawned first, both spin on the start signal, and the timed section
//! covers firing the signal through joining both threads.

use core::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};
use std::thread;

use log::{debug, error, info};

use crate::{
    backoff::Backoff,
    config::HarnessConfig,
    error::{ChecksumMismatchSnafu, OutOfOrderSnafu, Result, WorkerPanickedSnafu},
    signal::StartSignal,
    stats,
};
use spsc_ring_core::{Dequeue, Enqueue, SpscQueue};

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Values delivered.
    pub messages: u64,
    /// Wall time from start signal to both threads joined.
    pub elapsed: Duration,
    /// Wrapping sum of every delivered value.
    pub checksum: u64,
}

impl RunReport {
    /// Delivered values per second.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.messages as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} messages in {:.3} ms, throughput: {:.2} million messages/sec",
            self.messages,
            self.elapsed.as_secs_f64() * 1000.0,
            self.throughput() / 1e6
        )
    }
}

/// What the consumer verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Check {
    /// Every value equals its position.
    Order,
    /// Only the final sum is compared.
    Sum,
}

/// Per-run shared state.
#[derive(Debug, Default)]
pub(crate) struct RunContext {
    pub(crate) start: StartSignal,
    abort: AtomicBool,
}

impl RunContext {
    pub(crate) fn abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    pub(crate) fn aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }
}

/// Raises the abort flag if the owning worker unwinds.
struct AbortOnUnwind<'a>(&'a RunContext);

impl Drop for AbortOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abort();
        }
    }
}

/// Send `0..messages` and require the consumer to see them in order.
///
/// # Errors
/// [`OutOfOrder`](crate::HarnessError::OutOfOrder) on the first value that
/// is not the next one sent, plus the errors of [`HarnessConfig::validate`].
pub fn run_ordered<const N: usize>(config: &HarnessConfig) -> Result<RunReport> {
    run::<N>(config, Check::Order)
}

/// Send `1..=messages` and compare the consumer's sum with `m(m+1)/2`.
///
/// # Errors
/// [`ChecksumMismatch`](crate::HarnessError::ChecksumMismatch) if the sums
/// differ, plus the errors of [`HarnessConfig::validate`].
pub fn run_checksum<const N: usize>(config: &HarnessConfig) -> Result<RunReport> {
    run::<N>(config, Check::Sum)
}

fn run<const N: usize>(config: &HarnessConfig, check: Check) -> Result<RunReport> {
    config.validate()?;

    let first = match check {
        Check::Order => 0,
        Check::Sum => 1,
    };
    let messages = config.messages;
    debug!(
        "spsc run: check={check:?}, messages={messages}, slots={N}, layout: {}",
        SpscQueue::<u64, N>::layout()
    );

    let mut queue = SpscQueue::<u64, N>::new();
    let ctx = RunContext::default();
    let (producer, consumer) = queue.split();

    let ((produced, consumed), elapsed) = thread::scope(|s| {
        let ctx = &ctx;
        let reader = s.spawn(move || consume(consumer, ctx, config, first, check));
        let writer = s.spawn(move || produce(producer, ctx, config, first));

        stats::time("SPSC queue throughput", || {
            ctx.start.fire();
            (writer.join(), reader.join())
        })
    });

    if produced.is_err() {
        return WorkerPanickedSnafu { role: "producer" }.fail();
    }
    let checksum = consumed.map_err(|_| WorkerPanickedSnafu { role: "consumer" }.build())??;

    if check == Check::Sum {
        let expected = triangular(messages);
        if checksum != expected {
            error!("checksum mismatch: expected {expected}, got {checksum}");
            return ChecksumMismatchSnafu {
                expected,
                actual: checksum,
            }
            .fail();
        }
    }

    let report = RunReport {
        messages,
        elapsed,
        checksum,
    };
    info!("{report}");
    Ok(report)
}

/// `1 + 2 + … + m`, wrapping like the consumer's running sum.
fn triangular(m: u64) -> u64 {
    let m = u128::from(m);
    (m * (m + 1) / 2) as u64
}

/// Producer loop: enqueue `first..first + messages`, backing off while full.
pub(crate) fn produce<P: Enqueue<u64>>(
    mut producer: P,
    ctx: &RunContext,
    config: &HarnessConfig,
    first: u64,
) {
    let _guard = AbortOnUnwind(ctx);
    ctx.start.wait();

    let mut backoff = Backoff::new(config.backoff);
    for value in first..first + config.messages {
        let mut pending = value;
        while let Err(back) = producer.try_enqueue(pending) {
            if ctx.aborted() {
                debug!("producer stopping at {value}: run aborted");
                return;
            }
            pending = back;
            backoff.snooze();
        }
        backoff.reset();
    }
}

/// Consumer loop: dequeue `messages` values, returning their wrapping sum.
pub(crate) fn consume<C: Dequeue<u64>>(
    mut consumer: C,
    ctx: &RunContext,
    config: &HarnessConfig,
    first: u64,
    check: Check,
) -> Result<u64> {
    let _guard = AbortOnUnwind(ctx);
    ctx.start.wait();

    let mut backoff = Backoff::new(config.backoff);
    let end = first + config.messages;
    let mut expected = first;
    let mut sum = 0u64;

    while expected < end {
        match consumer.try_dequeue() {
            Some(received) => {
                if check == Check::Order && received != expected {
                    error!("expected {expected}, received {received}");
                    ctx.abort();
                    return OutOfOrderSnafu { expected, received }.fail();
                }
                sum = sum.wrapping_add(received);
                expected += 1;
                backoff.reset();
            }
            None => {
                if ctx.aborted() {
                    return WorkerPanickedSnafu { role: "producer" }.fail();
                }
                backoff.snooze();
            }
        }
    }
    Ok(sum)
}
