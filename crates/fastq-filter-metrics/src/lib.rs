#![deny(unsafe_code)]

//! Structured metric types and TSV writer for fastq-filter.
//!
//! This crate provides:
//! - [`Metric`] and [`ProcessingMetrics`] traits for metric types
//! - [`FilterMetric`], one row per configured read filter
//! - [`rejection`] module for rejection reason tracking
//! - [`writer`] module for TSV file output

pub mod filter;
pub mod rejection;
pub mod writer;

use serde::{Deserialize, Serialize};

/// Number of decimal places used for float metrics.
pub const FLOAT_PRECISION: usize = 6;

/// Formats a float value with the standard precision for metrics.
///
/// # Example
/// ```
/// use fastq_filter_metrics::format_float;
/// assert_eq!(format_float(0.9), "0.900000");
/// assert_eq!(format_float(0.0), "0.000000");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value:.FLOAT_PRECISION$}")
}

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type.
    ///
    /// Used in error messages and logging when writing metrics files.
    fn metric_name() -> &'static str;
}

/// Common interface for metrics that track how many items went in and came out.
pub trait ProcessingMetrics {
    /// Total number of items evaluated.
    fn total_input(&self) -> u64;

    /// Total number of items that were kept.
    fn total_output(&self) -> u64;

    /// Total number of items that were discarded.
    fn total_filtered(&self) -> u64 {
        self.total_input().saturating_sub(self.total_output())
    }

    /// Fraction of evaluated items that were kept, as a percentage.
    fn efficiency(&self) -> f64 {
        if self.total_input() == 0 {
            0.0
        } else {
            #[expect(clippy::cast_precision_loss, reason = "read counts never exceed 2^53")]
            let result = self.total_output() as f64 / self.total_input() as f64 * 100.0;
            result
        }
    }
}

pub use filter::FilterMetric;
pub use rejection::{RejectionReason, format_count};
pub use writer::write_metrics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_metrics_filter() {
        let metric = FilterMetric {
            filter: "min_length".to_string(),
            threshold: 100.0,
            total: 1000,
            passed: 800,
            failed: 200,
            fraction_passed: 0.8,
        };

        assert_eq!(metric.total_input(), 1000);
        assert_eq!(metric.total_output(), 800);
        assert_eq!(metric.total_filtered(), 200);
        assert!((metric.efficiency() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_processing_metrics_empty() {
        let metric = FilterMetric::default();
        assert_eq!(metric.total_filtered(), 0);
        assert!(metric.efficiency().abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.123_456_789), "0.123457");
        assert_eq!(format_float(1.0), "1.000000");
    }
}
