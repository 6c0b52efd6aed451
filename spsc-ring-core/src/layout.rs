//! Structural report of a queue's memory layout.

use core::fmt;

/// Size, alignment and cursor offsets of a [`SpscQueue`](crate::SpscQueue) type.
///
/// Obtained from [`SpscQueue::layout()`](crate::SpscQueue::layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueLayout {
    /// `size_of` the queue type.
    pub size: usize,
    /// `align_of` the queue type.
    pub align: usize,
    /// Byte offset of the producer cursor.
    pub head_offset: usize,
    /// Byte offset of the consumer cursor.
    pub tail_offset: usize,
    /// Byte offset of the slot array.
    pub slots_offset: usize,
    /// Cache-line size the layout was padded for.
    pub cache_line: usize,
}

impl QueueLayout {
    /// Distance in bytes between the two cursors.
    #[must_use]
    pub const fn cursor_distance(&self) -> usize {
        self.tail_offset.abs_diff(self.head_offset)
    }

    /// True if the cursors are a full line apart and on different lines.
    #[must_use]
    pub const fn cursors_isolated(&self) -> bool {
        self.cursor_distance() >= self.cache_line
            && self.head_offset / self.cache_line != self.tail_offset / self.cache_line
    }

    /// Offset of `addr` within its cache line.
    #[must_use]
    pub const fn line_offset(&self, addr: usize) -> usize {
        addr % self.cache_line
    }
}

impl fmt::Display for QueueLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size={}, align={}", self.size, self.align)?;
        writeln!(
            f,
            "offsets: head={}, tail={}, slots={}",
            self.head_offset, self.tail_offset, self.slots_offset
        )?;
        write!(
            f,
            "cursors {} ({} bytes apart, line={})",
            if self.cursors_isolated() {
                "isolated"
            } else {
                "SHARE A CACHE LINE"
            },
            self.cursor_distance(),
            self.cache_line
        )
    }
}
