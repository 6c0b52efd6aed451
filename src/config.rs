//! Harness configuration.

use snafu::ensure;

use crate::{
    backoff::BackoffConfig,
    error::{InvalidConfigSnafu, Result},
};

/// Parameters shared by the harness runs.
///
/// # Example
///
/// ```
/// use spsc_ring::HarnessConfig;
///
/// let config = HarnessConfig::default().with_messages(1_000);
/// assert!(config.validate().is_ok());
/// assert!(config.with_threads(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Values sent through the queue per run.
    pub messages: u64,
    /// Polling backoff for both queue workers.
    pub backoff: BackoffConfig,
    /// Worker threads for the counter runs.
    pub threads: usize,
    /// Increments per counter worker.
    pub increments: u64,
}

impl HarnessConfig {
    /// Set the message count.
    #[must_use]
    pub fn with_messages(mut self, messages: u64) -> Self {
        self.messages = messages;
        self
    }

    /// Set the polling backoff.
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the counter worker count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the increments per counter worker.
    #[must_use]
    pub fn with_increments(mut self, increments: u64) -> Self {
        self.increments = increments;
        self
    }

    /// Check the config before a run.
    ///
    /// # Errors
    /// [`HarnessError::InvalidConfig`](crate::HarnessError::InvalidConfig) if
    /// any count is zero, `messages` leaves no room for the last value sent,
    /// `threads * increments` overflows, or the backoff limits are out of
    /// order.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.messages > 0,
            InvalidConfigSnafu {
                message: "messages must be > 0"
            }
        );
        ensure!(
            self.messages < u64::MAX,
            InvalidConfigSnafu {
                message: "messages must be < u64::MAX"
            }
        );
        ensure!(
            self.threads > 0,
            InvalidConfigSnafu {
                message: "threads must be > 0"
            }
        );
        ensure!(
            self.increments > 0,
            InvalidConfigSnafu {
                message: "increments must be > 0"
            }
        );
        ensure!(
            u64::try_from(self.threads)
                .ok()
                .and_then(|threads| threads.checked_mul(self.increments))
                .is_some(),
            InvalidConfigSnafu {
                message: "threads * increments must fit in u64"
            }
        );
        ensure!(
            self.backoff.yield_limit >= self.backoff.spin_limit,
            InvalidConfigSnafu {
                message: "backoff yield_limit must be >= spin_limit"
            }
        );
        Ok(())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            messages: 10_000_000,
            backoff: BackoffConfig::DEFAULT,
            threads: 8,
            increments: 2_000_000,
        }
    }
}
