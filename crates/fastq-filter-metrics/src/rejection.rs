//! Rejection reason tracking for read groups.
//!
//! Each read filter rejects for exactly one reason, which lets the run summary
//! report why record groups were discarded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasons why a record group was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// No mate reached the minimum length
    TooShort,
    /// At least one mate exceeded the maximum length
    TooLong,
    /// Average per-base error rate was above the threshold
    ExcessiveErrorRate,
    /// Median base quality was below the threshold
    LowMedianQuality,
}

impl RejectionReason {
    /// Returns a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::TooShort => "No read in the group reached the minimum length",
            Self::TooLong => "A read in the group exceeded the maximum length",
            Self::ExcessiveErrorRate => "Average error rate was above the threshold",
            Self::LowMedianQuality => "Median quality was below the threshold",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Formats a count with thousands separators.
///
/// # Panics
///
/// Cannot panic: input is always valid UTF-8 since it comes from `u64::to_string()`.
///
/// # Examples
///
/// ```
/// use fastq_filter_metrics::rejection::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(123), "123");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();

    bytes
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}
