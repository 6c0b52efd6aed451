//! Lock-free single-producer, single-consumer ring buffer.

use core::{
    cell::{Cell, UnsafeCell},
    fmt,
    mem::{MaybeUninit, offset_of},
};

use crate::{
    index::AtomicIndex,
    layout::QueueLayout,
    traits::{Dequeue, Enqueue, QueueInfo},
};

/// Slot wrapper holding one item in the ring buffer.
#[repr(transparent)]
pub(crate) struct Slot<T> {
    pub(crate) data: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Slot<T> {
    const fn new() -> Self {
        Self {
            data: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }
}

/// Target cache-line size in bytes. 64 bytes is correct for x86-64 and most
/// ARM64 server cores. The `align(64)` on [`SpscQueue`] must match.
pub const CACHE_LINE: usize = 64;

/// Padding to fill the producer cache line (head + cached_tail + pad = CACHE_LINE).
const HEAD_PAD: usize = CACHE_LINE - size_of::<AtomicIndex>() - size_of::<Cell<usize>>();

/// Padding to fill the consumer cache line (tail + cached_head + pad = CACHE_LINE).
const TAIL_PAD: usize = CACHE_LINE - size_of::<AtomicIndex>() - size_of::<Cell<usize>>();

/// Maximum supported slot count (2^20 = ~1 million slots).
/// Prevents accidental huge inline arrays from typos like `SpscQueue<T, 1000000000>`.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Bounded lock-free queue for exactly one producer and one consumer.
///
/// `head` is the next slot the producer writes and `tail` the next slot the
/// consumer reads. Both are monotonic `usize` cursors mapped to a slot with
/// `cursor & (N - 1)`, so `N` must be a power of two. One slot is always
/// left free: the queue is full once `head - tail == N - 1`.
///
/// Fields are laid out with explicit cache-line padding so the producer's
/// cursor and the consumer's cursor never share a line.
///
/// # Ordering
///
/// ```text
/// producer: write slot[head]   -> store head (Release)
/// consumer: load head (Acquire) -> read slot[tail] -> store tail (Release)
/// producer: load tail (Acquire) -> reuse freed slot
/// ```
///
/// # Thread Safety
///
/// Concurrent access goes through the handles returned by
/// [`split()`](Self::split) or [`into_split()`](Self::into_split). They are
/// neither `Clone` nor `Sync`, so a second producer or consumer cannot be
/// created while the first is alive. Methods on the queue itself take
/// `&mut self`.
#[repr(C, align(64))]
pub struct SpscQueue<T, const N: usize> {
    // ── Producer cache line (producer writes head, consumer reads it) ──
    pub(crate) head: AtomicIndex,
    /// Producer-local copy of `tail`. Refreshed only when it says full.
    cached_tail: Cell<usize>,
    _pad_head: [u8; HEAD_PAD],

    // ── Consumer cache line (consumer writes tail, producer reads it) ──
    pub(crate) tail: AtomicIndex,
    /// Consumer-local copy of `head`. Refreshed only when it says empty.
    cached_head: Cell<usize>,
    _pad_tail: [u8; TAIL_PAD],

    // ── Cold fields ──────────────────────────────────────────────────
    pub(crate) slots: [Slot<T>; N],
}

// Safety: a value written by the producer is moved to the consumer thread,
// so `T: Send` is enough. The `Cell` caches are only touched by their owner.
unsafe impl<T: Send, const N: usize> Send for SpscQueue<T, N> {}
unsafe impl<T: Send, const N: usize> Sync for SpscQueue<T, N> {}

impl<T, const N: usize> SpscQueue<T, N> {
    /// Create a new queue with pre-warmed slots.
    ///
    /// Every slot is zero-filled to fault its pages and pull them into
    /// cache before the queue is shared.
    #[must_use]
    pub fn new() -> Self {
        let mut queue = Self::cold();
        queue.warm();
        queue
    }

    /// Create a new queue without touching the slots.
    ///
    /// Capacity is checked at compile time: `N` must be a power of two
    /// between 2 and [`MAX_CAPACITY`].
    #[must_use]
    pub const fn cold() -> Self {
        const { assert!(N >= 2, "capacity must be >= 2 (one slot is kept free)") };
        const { assert!(N.is_power_of_two(), "capacity must be power of two") };
        const { assert!(N <= MAX_CAPACITY, "capacity exceeds maximum (2^20)") };

        Self {
            head: AtomicIndex::new(0),
            cached_tail: Cell::new(0),
            _pad_head: [0; HEAD_PAD],
            tail: AtomicIndex::new(0),
            cached_head: Cell::new(0),
            _pad_tail: [0; TAIL_PAD],
            slots: [const { Slot::new() }; N],
        }
    }

    fn warm(&mut self) {
        for slot in &mut self.slots {
            // Safety: raw zero bytes in MaybeUninit storage never form a typed `T`.
            unsafe {
                let ptr = slot.data.get_mut().as_mut_ptr().cast::<u8>();
                core::ptr::write_bytes(ptr, 0, size_of::<T>());
            }
        }
        self.head.store_mut(0);
        self.cached_tail.set(0);
        self.tail.store_mut(0);
        self.cached_head.set(0);
    }

    /// Move both cursors (and their cached copies) to `at` on an empty queue.
    #[cfg(test)]
    pub(crate) fn set_cursors(&mut self, at: usize) {
        debug_assert!(self.is_empty());
        self.head.store_mut(at);
        self.cached_tail.set(at);
        self.tail.store_mut(at);
        self.cached_head.set(at);
    }

    // ── Protocol (&self, atomic) ─────────────────────────────────────

    /// Producer side of the protocol.
    ///
    /// # Safety
    /// No other thread may run `enqueue` on this queue concurrently.
    #[inline]
    pub(crate) unsafe fn enqueue(&self, value: T) -> Result<(), T> {
        let head = self.head.load_relaxed();

        let mut tail = self.cached_tail.get();
        if head.wrapping_sub(tail) >= N - 1 {
            tail = self.tail.load();
            self.cached_tail.set(tail);

            if head.wrapping_sub(tail) >= N - 1 {
                return Err(value);
            }
        }

        let idx = head & (N - 1);
        unsafe { (*self.slots[idx].data.get()).write(value) };
        self.head.store(head.wrapping_add(1));
        Ok(())
    }

    /// Consumer side of the protocol.
    ///
    /// # Safety
    /// No other thread may run `dequeue` on this queue concurrently.
    #[inline]
    pub(crate) unsafe fn dequeue(&self) -> Option<T> {
        let tail = self.tail.load_relaxed();

        let mut head = self.cached_head.get();
        if head == tail {
            head = self.head.load();
            self.cached_head.set(head);

            if head == tail {
                return None;
            }
        }

        let idx = tail & (N - 1);
        let value = unsafe { (*self.slots[idx].data.get()).assume_init_read() };
        self.tail.store(tail.wrapping_add(1));
        Some(value)
    }

    // ── Exclusive access (&mut self) ─────────────────────────────────

    /// Enqueue with exclusive access. Returns the value back if full.
    #[inline]
    pub fn try_enqueue(&mut self, value: T) -> Result<(), T> {
        // Safety: `&mut self` rules out any other producer.
        unsafe { self.enqueue(value) }
    }

    /// Dequeue the oldest value with exclusive access.
    #[inline]
    #[must_use]
    pub fn try_dequeue(&mut self) -> Option<T> {
        // Safety: `&mut self` rules out any other consumer.
        unsafe { self.dequeue() }
    }

    /// Drain all values, oldest first.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T, N> {
        Drain { queue: self }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Number of values resident.
    ///
    /// From another thread this is a snapshot; it may be stale by the
    /// time it is returned.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        // tail first: head only grows, so the difference never goes negative.
        let tail = self.tail.load();
        let head = self.head.load();
        let len = head.wrapping_sub(tail);
        if len > N - 1 { N - 1 } else { len }
    }

    /// True if empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if full.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= N - 1
    }

    /// Maximum number of resident values (`N - 1`).
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of slots in the ring (`N`).
    #[inline]
    #[must_use]
    pub const fn slots(&self) -> usize {
        N
    }

    /// Field offsets and size of this queue type.
    #[must_use]
    pub const fn layout() -> QueueLayout {
        QueueLayout {
            size: size_of::<Self>(),
            align: align_of::<Self>(),
            head_offset: offset_of!(Self, head),
            tail_offset: offset_of!(Self, tail),
            slots_offset: offset_of!(Self, slots),
            cache_line: CACHE_LINE,
        }
    }
}

/// Draining iterator over a [`SpscQueue`].
pub struct Drain<'a, T, const N: usize> {
    queue: &'a mut SpscQueue<T, N>,
}

impl<T, const N: usize> Iterator for Drain<'_, T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.queue.try_dequeue()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T, const N: usize> ExactSizeIterator for Drain<'_, T, N> {}

impl<T, const N: usize> Default for SpscQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for SpscQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpscQueue")
            .field("head", &self.head.load())
            .field("tail", &self.tail.load())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T, const N: usize> Drop for SpscQueue<T, N> {
    fn drop(&mut self) {
        if core::mem::needs_drop::<T>() {
            while self.try_dequeue().is_some() {}
        }
    }
}

impl<T, const N: usize> QueueInfo for SpscQueue<T, N> {
    #[inline]
    fn len(&self) -> usize {
        SpscQueue::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        N - 1
    }
}

impl<T, const N: usize> Enqueue<T> for SpscQueue<T, N> {
    #[inline]
    fn try_enqueue(&mut self, value: T) -> Result<(), T> {
        SpscQueue::try_enqueue(self, value)
    }
}

impl<T, const N: usize> Dequeue<T> for SpscQueue<T, N> {
    #[inline]
    fn try_dequeue(&mut self) -> Option<T> {
        SpscQueue::try_dequeue(self)
    }
}
