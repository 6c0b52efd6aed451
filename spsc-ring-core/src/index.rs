//! Cursor index shared between the producer and the consumer.

use core::sync::atomic::{AtomicUsize, Ordering};

/// Monotonic ring cursor using Acquire/Release ordering.
///
/// Only its owning side ever stores to it; the other side only loads.
#[repr(transparent)]
pub struct AtomicIndex(AtomicUsize);

impl AtomicIndex {
    #[inline]
    pub const fn new(val: usize) -> Self {
        Self(AtomicUsize::new(val))
    }

    /// Load with Acquire ordering (reading the other side's cursor).
    #[inline]
    pub fn load(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Load with Relaxed ordering (for reading own index).
    #[inline]
    pub fn load_relaxed(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    /// Store with Release ordering (publishing own cursor).
    #[inline]
    pub fn store(&self, val: usize) {
        self.0.store(val, Ordering::Release);
    }

    /// Load without atomics (exclusive access).
    #[inline]
    pub fn load_mut(&mut self) -> usize {
        *self.0.get_mut()
    }

    /// Store without atomics (exclusive access).
    #[inline]
    pub fn store_mut(&mut self, val: usize) {
        *self.0.get_mut() = val;
    }
}

#[cfg(test)]
mod tests {
    use super::AtomicIndex;

    #[test]
    fn exclusive_and_shared_views_agree() {
        let mut index = AtomicIndex::new(3);
        assert_eq!(index.load(), 3);
        index.store_mut(usize::MAX);
        assert_eq!(index.load_relaxed(), usize::MAX);
        index.store(index.load().wrapping_add(1));
        assert_eq!(index.load_mut(), 0);
    }
}
