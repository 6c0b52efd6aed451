//! Release/acquire start rendezvous.

use core::sync::atomic::{AtomicBool, Ordering};

/// One-shot start flag shared by a coordinator and its workers.
///
/// Workers call [`wait()`](Self::wait) and spin until the coordinator
/// calls [`fire()`](Self::fire). Everything the coordinator wrote before
/// firing is visible to a worker once `wait` returns.
#[derive(Debug, Default)]
pub struct StartSignal {
    fired: AtomicBool,
}

impl StartSignal {
    /// Create an unfired signal.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Release every waiting worker.
    #[inline]
    pub fn fire(&self) {
        self.fired.store(true, Ordering::Release);
    }

    /// True once fired.
    #[inline]
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Spin until fired.
    #[inline]
    pub fn wait(&self) {
        while !self.is_fired() {
            core::hint::spin_loop();
        }
    }

    /// Re-arm for another round. Only call with no worker waiting.
    #[inline]
    pub fn reset(&self) {
        self.fired.store(false, Ordering::Relaxed);
    }
}
