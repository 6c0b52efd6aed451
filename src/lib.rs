//! A lock-free single-producer, single-consumer ring buffer.
//!
//! The queue itself lives in `spsc_ring_core` and is re-exported here. With
//! the `std` feature (default) this crate adds the harness that drives it:
//! adaptive backoff, a start rendezvous, timing statistics, ordered and
//! checksum throughput runs, and a packed vs. padded counter comparison.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub use spsc_ring_core::*;

#[cfg(feature = "std")]
mod backoff;
#[cfg(feature = "std")]
mod config;
#[cfg(feature = "std")]
mod counters;
#[cfg(feature = "std")]
mod error;
#[cfg(feature = "std")]
mod harness;
#[cfg(feature = "std")]
mod signal;
#[cfg(feature = "std")]
mod stats;

#[cfg(all(test, feature = "std"))]
mod tests;

#[cfg(feature = "std")]
pub use backoff::{Backoff, BackoffConfig, Phase};
#[cfg(feature = "std")]
pub use config::HarnessConfig;
#[cfg(feature = "std")]
pub use counters::{CounterLayout, CounterReport, run_counters};
#[cfg(feature = "std")]
pub use error::{HarnessError, Result};
#[cfg(feature = "std")]
pub use harness::{RunReport, run_checksum, run_ordered};
#[cfg(feature = "std")]
pub use signal::StartSignal;
#[cfg(feature = "std")]
pub use stats::{Stats, StatsDisplay, time};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Consumer, Dequeue, Enqueue, Producer, QueueInfo, SpscQueue};

    #[cfg(feature = "std")]
    pub use crate::{Backoff, BackoffConfig, HarnessConfig, HarnessError, StartSignal};
}
