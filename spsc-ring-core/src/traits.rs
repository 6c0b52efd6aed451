/// Common queue properties.
/// Provides size and capacity information shared by both producers and consumers.
pub trait QueueInfo {
    /// Returns the number of values currently resident.
    fn len(&self) -> usize;

    /// Returns the maximum number of resident values.
    fn capacity(&self) -> usize;

    /// Returns `true` if the queue contains no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the queue has no free slot.
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
}

/// Producer side of a queue.
///
/// See [`Producer`](crate::Producer) for the concurrent implementation.
pub trait Enqueue<T>: QueueInfo {
    /// Attempts to enqueue a value.
    ///
    /// # Errors:
    /// Returns `Ok(())` if successful, or `Err(value)` if the queue is full.
    fn try_enqueue(&mut self, value: T) -> Result<(), T>;
}

/// Consumer side of a queue.
///
/// See [`Consumer`](crate::Consumer) for the concurrent implementation.
pub trait Dequeue<T>: QueueInfo {
    /// Attempts to dequeue the oldest value.
    ///
    /// Returns `Some(value)` if the queue was non-empty, or `None` if empty.
    #[must_use]
    fn try_dequeue(&mut self) -> Option<T>;
}
