//! Adaptive backoff for polling a non-blocking queue.

use std::{thread, time::Duration};

/// Thresholds for [`Backoff`].
///
/// Attempts below `spin_limit` issue a CPU spin hint, attempts below
/// `yield_limit` yield to the scheduler, later attempts sleep for `sleep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Attempts spent spinning.
    pub spin_limit: u32,
    /// Attempts (counted from zero) after which yielding stops.
    pub yield_limit: u32,
    /// Sleep once both limits are exhausted.
    pub sleep: Duration,
}

impl BackoffConfig {
    /// 32 spins, then yields up to attempt 64, then 50 µs sleeps.
    pub const DEFAULT: Self = Self {
        spin_limit: 32,
        yield_limit: 64,
        sleep: Duration::from_micros(50),
    };

    /// Only ever spin. Lowest latency, burns a core while waiting.
    pub const SPIN: Self = Self {
        spin_limit: u32::MAX,
        yield_limit: u32::MAX,
        sleep: Duration::ZERO,
    };
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Current escalation step of a [`Backoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `core::hint::spin_loop()`.
    Spin,
    /// `std::thread::yield_now()`.
    Yield,
    /// `std::thread::sleep(config.sleep)`.
    Sleep,
}

/// Spin → yield → sleep escalation for a retry loop.
///
/// Call [`snooze()`](Self::snooze) after every failed attempt and
/// [`reset()`](Self::reset) after progress.
///
/// # Example
///
/// ```
/// use spsc_ring::{Backoff, BackoffConfig, SpscQueue};
///
/// let mut queue = SpscQueue::<u32, 4>::new();
/// let (producer, _consumer) = queue.split();
/// let mut backoff = Backoff::new(BackoffConfig::default());
///
/// while producer.try_enqueue(1).is_err() {
///     backoff.snooze();
/// }
/// backoff.reset();
/// ```
#[derive(Debug, Clone)]
pub struct Backoff {
    attempts: u32,
    config: BackoffConfig,
}

impl Backoff {
    /// Create a backoff at attempt zero.
    #[must_use]
    pub const fn new(config: BackoffConfig) -> Self {
        Self {
            attempts: 0,
            config,
        }
    }

    /// Wait according to the current phase, then escalate.
    #[inline]
    pub fn snooze(&mut self) {
        match self.phase() {
            Phase::Spin => core::hint::spin_loop(),
            Phase::Yield => thread::yield_now(),
            Phase::Sleep => thread::sleep(self.config.sleep),
        }
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Back to spinning.
    #[inline]
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Failed attempts since the last reset.
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Phase the next [`snooze()`](Self::snooze) will use.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.attempts < self.config.spin_limit {
            Phase::Spin
        } else if self.attempts < self.config.yield_limit {
            Phase::Yield
        } else {
            Phase::Sleep
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(BackoffConfig::DEFAULT)
    }
}
