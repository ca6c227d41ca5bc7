//! Interval progress logging.
//!
//! [`ProgressTracker`] counts processed record groups and logs a line each time the
//! count crosses a multiple of its interval. The count is atomic, so one tracker
//! can be shared by several workers.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

use fastq_filter_metrics::format_count;

/// Default number of record groups between progress lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Logs `"{message} {count}"` every `interval` items.
///
/// # Example
/// ```
/// use fastq_filter_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Processed read groups").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // logs at 100 and 200
/// }
/// tracker.log_final(); // logs "Processed read groups 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: AtomicU64,
}

impl ProgressTracker {
    /// Creates a tracker with the default interval.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            interval: DEFAULT_PROGRESS_INTERVAL,
            message: message.into(),
            count: AtomicU64::new(0),
        }
    }

    /// Sets the logging interval. An interval of zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds `additional` to the count, logging once per interval boundary crossed.
    ///
    /// Returns `true` if the count now sits exactly on a boundary.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let count = prev + additional;

        for milestone in (prev / self.interval + 1)..=(count / self.interval) {
            info!("{} {}", self.message, format_count(milestone * self.interval));
        }
        count > 0 && count.is_multiple_of(self.interval)
    }

    /// Logs the final count unless it was just logged as a boundary.
    pub fn log_final(&self) {
        let count = self.count();
        if count > 0 && !count.is_multiple_of(self.interval) {
            info!("{} {} (complete)", self.message, format_count(count));
        }
    }

    /// Items counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
