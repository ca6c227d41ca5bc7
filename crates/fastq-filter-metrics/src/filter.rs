//! Per-filter pass/fail counts.

use serde::{Deserialize, Serialize, Serializer};

use crate::{Metric, ProcessingMetrics, format_float};

/// Writes fractions with the fixed metrics precision.
fn serialize_fraction<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_float(*value))
}

/// Counts for a single read filter over a whole run.
///
/// One row is written per configured filter, in the order the filters were
/// applied. Because filters are chained, `total` for a later filter only counts
/// the record groups that passed every earlier filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterMetric {
    /// Short name of the filter (e.g. `min_length`).
    pub filter: String,
    /// The configured threshold.
    pub threshold: f64,
    /// Number of record groups evaluated by this filter.
    pub total: u64,
    /// Number of record groups that passed.
    pub passed: u64,
    /// Number of record groups that failed.
    pub failed: u64,
    /// `passed / total`, or 0 when nothing was evaluated.
    #[serde(serialize_with = "serialize_fraction")]
    pub fraction_passed: f64,
}

impl FilterMetric {
    /// Builds a metric row from raw counts, deriving `failed` and `fraction_passed`.
    #[must_use]
    pub fn new(filter: impl Into<String>, threshold: f64, total: u64, passed: u64) -> Self {
        let fraction_passed = if total == 0 {
            0.0
        } else {
            #[expect(clippy::cast_precision_loss, reason = "read counts never exceed 2^53")]
            let fraction = passed as f64 / total as f64;
            fraction
        };
        Self {
            filter: filter.into(),
            threshold,
            total,
            passed,
            failed: total.saturating_sub(passed),
            fraction_passed,
        }
    }
}

impl Metric for FilterMetric {
    fn metric_name() -> &'static str {
        "read filter"
    }
}

impl ProcessingMetrics for FilterMetric {
    fn total_input(&self) -> u64 {
        self.total
    }

    fn total_output(&self) -> u64 {
        self.passed
    }

    fn total_filtered(&self) -> u64 {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_fields() {
        let metric = FilterMetric::new("median_quality", 20.0, 10, 4);
        assert_eq!(metric.filter, "median_quality");
        assert_eq!(metric.failed, 6);
        assert!((metric.fraction_passed - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_with_zero_total() {
        let metric = FilterMetric::new("max_length", 150.0, 0, 0);
        assert_eq!(metric.failed, 0);
        assert!(metric.fraction_passed.abs() < f64::EPSILON);
    }

    #[test]
    fn test_processing_metrics_match_fields() {
        let metric = FilterMetric::new("min_length", 50.0, 8, 6);
        assert_eq!(metric.total_input(), 8);
        assert_eq!(metric.total_output(), 6);
        assert_eq!(metric.total_filtered(), 2);
        assert!((metric.efficiency() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metric_name() {
        assert_eq!(FilterMetric::metric_name(), "read filter");
    }
}
