//! Producer and consumer handles.
//!
//! The queue's concurrent operations are only reachable through these
//! handles. None of them is `Clone` or `Sync`, which keeps the
//! single-producer/single-consumer contract in the type system.

use core::{cell::Cell, marker::PhantomData};

use crate::{
    queue::SpscQueue,
    traits::{Dequeue, Enqueue, QueueInfo},
};

/// Makes a handle `!Sync` while leaving it `Send`.
type NotSync = PhantomData<Cell<()>>;

impl<T, const N: usize> SpscQueue<T, N> {
    /// Split into borrowed producer and consumer handles.
    ///
    /// The exclusive borrow guarantees no other handle exists while these
    /// are alive. Pair with `std::thread::scope` to move each handle to
    /// its own thread.
    ///
    /// # Example
    ///
    /// ```
    /// use spsc_ring_core::SpscQueue;
    ///
    /// let mut queue = SpscQueue::<u32, 8>::new();
    /// let (producer, consumer) = queue.split();
    ///
    /// assert!(producer.try_enqueue(7).is_ok());
    /// assert_eq!(consumer.try_dequeue(), Some(7));
    /// ```
    pub fn split(&mut self) -> (Producer<'_, T, N>, Consumer<'_, T, N>) {
        let queue: &Self = self;
        (
            Producer {
                queue,
                _not_sync: PhantomData,
            },
            Consumer {
                queue,
                _not_sync: PhantomData,
            },
        )
    }
}

/// Producer handle for a [`SpscQueue`]. Can only enqueue.
///
/// Created by [`SpscQueue::split()`].
pub struct Producer<'a, T, const N: usize> {
    queue: &'a SpscQueue<T, N>,
    _not_sync: NotSync,
}

impl<T, const N: usize> Producer<'_, T, N> {
    /// Enqueue a value, or hand it back if the queue is full.
    #[inline]
    pub fn try_enqueue(&self, value: T) -> Result<(), T> {
        // Safety: this handle is the only producer and is not `Sync`.
        unsafe { self.queue.enqueue(value) }
    }

    /// Number of values currently resident.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True if the queue is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Maximum number of resident values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}

/// Consumer handle for a [`SpscQueue`]. Can only dequeue.
///
/// Created by [`SpscQueue::split()`].
pub struct Consumer<'a, T, const N: usize> {
    queue: &'a SpscQueue<T, N>,
    _not_sync: NotSync,
}

impl<T, const N: usize> Consumer<'_, T, N> {
    /// Dequeue the oldest value.
    #[inline]
    pub fn try_dequeue(&self) -> Option<T> {
        // Safety: this handle is the only consumer and is not `Sync`.
        unsafe { self.queue.dequeue() }
    }

    /// Number of values currently resident.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True if the queue is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Maximum number of resident values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}

impl<T, const N: usize> QueueInfo for Producer<'_, T, N> {
    #[inline]
    fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        N - 1
    }
}

impl<T, const N: usize> Enqueue<T> for Producer<'_, T, N> {
    #[inline]
    fn try_enqueue(&mut self, value: T) -> Result<(), T> {
        Producer::try_enqueue(self, value)
    }
}

impl<T, const N: usize> QueueInfo for Consumer<'_, T, N> {
    #[inline]
    fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        N - 1
    }
}

impl<T, const N: usize> Dequeue<T> for Consumer<'_, T, N> {
    #[inline]
    fn try_dequeue(&mut self) -> Option<T> {
        Consumer::try_dequeue(self)
    }
}

// ── Owned handles ────────────────────────────────────────────────────

#[cfg(feature = "alloc")]
mod owned {
    extern crate alloc;
    use alloc::sync::Arc;
    use core::marker::PhantomData;

    use super::NotSync;
    use crate::{
        queue::SpscQueue,
        traits::{Dequeue, Enqueue, QueueInfo},
    };

    impl<T, const N: usize> SpscQueue<T, N> {
        /// Split into owned producer and consumer handles.
        ///
        /// Both handles hold an `Arc` to the queue, which is dropped (along
        /// with any values still resident) when the last handle goes away.
        ///
        /// # Example
        ///
        /// ```
        /// use spsc_ring_core::SpscQueue;
        /// use std::thread;
        ///
        /// let (producer, consumer) = SpscQueue::<u64, 256>::new().into_split();
        ///
        /// let t = thread::spawn(move || {
        ///     for i in 0..100 {
        ///         while producer.try_enqueue(i).is_err() {
        ///             std::hint::spin_loop();
        ///         }
        ///     }
        /// });
        ///
        /// let mut next = 0;
        /// while next < 100 {
        ///     if let Some(v) = consumer.try_dequeue() {
        ///         assert_eq!(v, next);
        ///         next += 1;
        ///     }
        /// }
        /// t.join().unwrap();
        /// ```
        pub fn into_split(self) -> (OwnedProducer<T, N>, OwnedConsumer<T, N>) {
            let queue = Arc::new(self);
            (
                OwnedProducer {
                    queue: Arc::clone(&queue),
                    _not_sync: PhantomData,
                },
                OwnedConsumer {
                    queue,
                    _not_sync: PhantomData,
                },
            )
        }
    }

    /// Owned producer handle. Can only enqueue.
    ///
    /// Created by [`SpscQueue::into_split()`].
    pub struct OwnedProducer<T, const N: usize> {
        queue: Arc<SpscQueue<T, N>>,
        _not_sync: NotSync,
    }

    impl<T, const N: usize> OwnedProducer<T, N> {
        /// Enqueue a value, or hand it back if the queue is full.
        #[inline]
        pub fn try_enqueue(&self, value: T) -> Result<(), T> {
            // Safety: this handle is the only producer and is not `Sync`.
            unsafe { self.queue.enqueue(value) }
        }

        /// Number of values currently resident.
        #[inline]
        pub fn len(&self) -> usize {
            self.queue.len()
        }

        /// True if the queue is empty.
        #[inline]
        pub fn is_empty(&self) -> bool {
            self.queue.is_empty()
        }

        /// True if the queue is full.
        #[inline]
        pub fn is_full(&self) -> bool {
            self.queue.is_full()
        }

        /// Maximum number of resident values.
        #[inline]
        pub fn capacity(&self) -> usize {
            self.queue.capacity()
        }
    }

    /// Owned consumer handle. Can only dequeue.
    ///
    /// Created by [`SpscQueue::into_split()`].
    pub struct OwnedConsumer<T, const N: usize> {
        queue: Arc<SpscQueue<T, N>>,
        _not_sync: NotSync,
    }

    impl<T, const N: usize> OwnedConsumer<T, N> {
        /// Dequeue the oldest value.
        #[inline]
        pub fn try_dequeue(&self) -> Option<T> {
            // Safety: this handle is the only consumer and is not `Sync`.
            unsafe { self.queue.dequeue() }
        }

        /// Number of values currently resident.
        #[inline]
        pub fn len(&self) -> usize {
            self.queue.len()
        }

        /// True if the queue is empty.
        #[inline]
        pub fn is_empty(&self) -> bool {
            self.queue.is_empty()
        }

        /// True if the queue is full.
        #[inline]
        pub fn is_full(&self) -> bool {
            self.queue.is_full()
        }

        /// Maximum number of resident values.
        #[inline]
        pub fn capacity(&self) -> usize {
            self.queue.capacity()
        }
    }

    impl<T, const N: usize> QueueInfo for OwnedProducer<T, N> {
        #[inline]
        fn len(&self) -> usize {
            self.queue.len()
        }

        #[inline]
        fn capacity(&self) -> usize {
            N - 1
        }
    }

    impl<T, const N: usize> Enqueue<T> for OwnedProducer<T, N> {
        #[inline]
        fn try_enqueue(&mut self, value: T) -> Result<(), T> {
            OwnedProducer::try_enqueue(self, value)
        }
    }

    impl<T, const N: usize> QueueInfo for OwnedConsumer<T, N> {
        #[inline]
        fn len(&self) -> usize {
            self.queue.len()
        }

        #[inline]
        fn capacity(&self) -> usize {
            N - 1
        }
    }

    impl<T, const N: usize> Dequeue<T> for OwnedConsumer<T, N> {
        #[inline]
        fn try_dequeue(&mut self) -> Option<T> {
            OwnedConsumer::try_dequeue(self)
        }
    }
}

#[cfg(feature = "alloc")]
pub use owned::{OwnedConsumer, OwnedProducer};
