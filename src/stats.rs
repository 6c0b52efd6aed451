//! Timing and summary statistics.

use core::fmt;
use std::time::{Duration, Instant};

/// Running summary of a series of samples (seconds for timings).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    sum: f64,
    sum_sq: f64,
    count: u64,
    min: f64,
    max: f64,
}

impl Stats {
    /// Empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Record one sample.
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.sum_sq += value * value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Record a duration in seconds.
    pub fn add_duration(&mut self, elapsed: Duration) {
        self.add(elapsed.as_secs_f64());
    }

    /// Number of samples.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean, zero when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Population standard deviation, zero below two samples.
    #[must_use]
    pub fn stddev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self.sum_sq / self.count as f64 - mean * mean;
        if variance > 0.0 { variance.sqrt() } else { 0.0 }
    }

    /// Smallest sample.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest sample.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Render as `label: mean=… ms, stddev=… ms, min=… ms, max=… ms (n=…)`,
    /// treating samples as seconds.
    #[must_use]
    pub fn display<'a>(&'a self, label: &'a str) -> StatsDisplay<'a> {
        StatsDisplay { stats: self, label }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Duration> for Stats {
    fn extend<I: IntoIterator<Item = Duration>>(&mut self, iter: I) {
        for elapsed in iter {
            self.add_duration(elapsed);
        }
    }
}

/// Labelled millisecond rendering of [`Stats`].
pub struct StatsDisplay<'a> {
    stats: &'a Stats,
    label: &'a str,
}

impl fmt::Display for StatsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = |secs: f64| secs * 1000.0;
        write!(
            f,
            "{}: mean={:.3} ms, stddev={:.3} ms, min={:.3} ms, max={:.3} ms (n={})",
            self.label,
            ms(self.stats.mean()),
            ms(self.stats.stddev()),
            ms(self.stats.min().unwrap_or(0.0)),
            ms(self.stats.max().unwrap_or(0.0)),
            self.stats.count()
        )
    }
}

/// Run `f`, log `label: X.XXX ms` at info level, and return its result
/// with the elapsed time.
pub fn time<R>(label: &str, f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    log::info!("{label}: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    (result, elapsed)
}
