//! Error types for harness runs.

use snafu::Snafu;

/// Error raised while configuring or running a harness.
///
/// A full or empty queue is never an error; these only describe a
/// misconfigured run or a broken delivery guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum HarnessError {
    /// Config rejected before any thread was spawned.
    #[snafu(display("invalid harness config: {message}"))]
    InvalidConfig {
        /// What was wrong.
        message: &'static str,
    },

    /// Consumer saw a value other than the next one sent.
    #[snafu(display("out of order: expected {expected}, received {received}"))]
    OutOfOrder {
        /// Value the consumer was waiting for.
        expected: u64,
        /// Value it actually dequeued.
        received: u64,
    },

    /// Sum of dequeued values differs from the sum enqueued.
    #[snafu(display("checksum mismatch: expected {expected}, got {actual}"))]
    ChecksumMismatch {
        /// Sum of the values sent.
        expected: u64,
        /// Sum of the values received.
        actual: u64,
    },

    /// Per-thread counters did not add up.
    #[snafu(display("counter mismatch: expected {expected}, got {actual}"))]
    CountMismatch {
        /// `threads * increments`.
        expected: u64,
        /// Sum over all counters.
        actual: u64,
    },

    /// A worker thread panicked.
    #[snafu(display("{role} thread panicked"))]
    WorkerPanicked {
        /// Which worker.
        role: &'static str,
    },
}

/// Result type for harness operations.
pub type Result<T> = core::result::Result<T, HarnessError>;
