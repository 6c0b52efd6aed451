//! Core implementation for spsc_ring.
//!
//! A bounded, lock-free ring buffer for exactly one producer thread and one
//! consumer thread, synchronized with Acquire/Release cursor stores only.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

mod handle;
mod index;
mod layout;
mod queue;
mod traits;

#[cfg(test)]
mod tests;

#[cfg(feature = "alloc")]
pub use handle::{OwnedConsumer, OwnedProducer};
pub use handle::{Consumer, Producer};
pub use layout::QueueLayout;
pub use queue::{CACHE_LINE, Drain, MAX_CAPACITY, SpscQueue};
pub use traits::{Dequeue, Enqueue, QueueInfo};
