//! Logging helpers for run summaries.
//!
//! Formatting for percentages, durations and rates, an [`OperationTimer`] that
//! logs how long a run took, and [`log_filter_summary`], which reports how many
//! record groups each filter removed.

use std::time::{Duration, Instant};

use fastq_filter_metrics::{ProcessingMetrics, format_count};

use crate::filter::FilterChain;
use crate::record::RecordAccessor;

/// Formats a fraction as a percentage with `decimals` decimal places.
///
/// # Examples
///
/// ```
/// use fastq_filter_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration as e.g. `45s`, `2m 15s` or `1h 30m`.
///
/// # Examples
///
/// ```
/// use fastq_filter_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        0..60 => format!("{secs}s"),
        60..3600 => match (secs / 60, secs % 60) {
            (mins, 0) => format!("{mins}m"),
            (mins, rem) => format!("{mins}m {rem}s"),
        },
        _ => match (secs / 3600, (secs % 3600) / 60) {
            (hours, 0) => format!("{hours}h"),
            (hours, mins) => format!("{hours}h {mins}m"),
        },
    }
}

/// Formats a throughput in `unit`s per second, falling back to per minute for slow rates.
///
/// # Examples
///
/// ```
/// use fastq_filter_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(1000, Duration::from_secs(1), "reads"), "1,000 reads/s");
/// assert_eq!(format_rate(30, Duration::from_secs(60), "reads"), "30.0 reads/min");
/// ```
#[must_use]
pub fn format_rate(count: u64, duration: Duration, unit: &str) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} {unit}/s", format_count(count));
    }
    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} {unit}/s", format_count(rate as u64))
    } else {
        format!("{:.1} {unit}/min", count as f64 / (secs / 60.0))
    }
}

/// Logs a per-filter summary of a run.
///
/// Filters are listed in the order they were applied; each one only sees the
/// record groups that survived the filters before it.
pub fn log_filter_summary<A: RecordAccessor>(chain: &FilterChain<A>) {
    let counts = chain.counts();
    log::info!("Filtering Summary:");
    log::info!("  Input read groups: {}", format_count(counts.total));
    log::info!("  Kept read groups: {}", format_count(counts.passed));
    if counts.total > 0 {
        log::info!("  Pass rate: {}", format_percent(counts.efficiency() / 100.0, 2));
    }

    for filter in chain.filters() {
        let metric = filter.metric();
        log::info!(
            "  {}: removed {} of {} ({})",
            filter.kind(),
            format_count(metric.total_filtered()),
            format_count(metric.total_input()),
            filter.kind().rejection_reason()
        );
    }
}

/// Logs the start of an operation and, later, its duration and throughput.
///
/// # Examples
///
/// ```no_run
/// use fastq_filter_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Filtering reads");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Starts the timer and logs `"{operation} ..."`.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Time since the timer started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs completion with the number of record groups processed.
    pub fn log_completion(&self, count: u64) {
        let duration = self.elapsed();
        log::info!(
            "{} completed: {} read groups in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration, "read groups")
        );
    }
}
