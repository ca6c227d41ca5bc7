//! Threshold filters over single records and mate groups.
//!
//! A [`ReadFilter`] pairs a [`FilterKind`] (what is measured and the threshold it
//! is compared against) with a [`RecordAccessor`] (how to read the record type) and
//! keeps running pass/fail counts. Every evaluation takes a *group* of records: a
//! single-end read is a group of one, a read pair is a group of two.
//!
//! | Kind | Statistic | Group passes when |
//! |------|-----------|-------------------|
//! | [`FilterKind::MinimumLength`] | sequence length per mate | any mate is long enough |
//! | [`FilterKind::MaximumLength`] | sequence length per mate | every mate is short enough |
//! | [`FilterKind::AverageErrorRate`] | mean error rate of all mates' qualities | `rate <= threshold` |
//! | [`FilterKind::MedianQuality`] | median of all mates' qualities | `median >= threshold` |
//!
//! Mates sequence the same molecule, so one long mate is enough to keep a pair,
//! while one over-length mate (e.g. read-through into adapter) is enough to drop it.
//!
//! Quality statistics of an empty group are NaN, which fails both quality filters.
//!
//! # Example
//!
//! ```
//! use fastq_filter_lib::filter::ReadFilter;
//! use fastq_filter_lib::record::{SequenceRecord, SequenceRecordAccessor};
//!
//! let mut filter = ReadFilter::median_quality(30.0, 33, SequenceRecordAccessor)?;
//! let good = SequenceRecord::new("r1", "ACGT", "IIII");
//! let bad = SequenceRecord::new("r2", "ACGT", "++++");
//!
//! assert!(filter.evaluate_one(&good)?);
//! assert!(!filter.evaluate_one(&bad)?);
//! assert_eq!(filter.total(), 2);
//! assert_eq!(filter.passed(), 1);
//! # Ok::<(), fastq_filter_lib::errors::FilterError>(())
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use fastq_filter_metrics::{FilterMetric, ProcessingMetrics, RejectionReason};

use crate::error_rate::ErrorRateAccumulator;
use crate::errors::{FilterError, Result};
use crate::histogram::QualityHistogram;
use crate::phred::{check_ascii, validate_phred_offset};
use crate::record::RecordAccessor;

/// What a filter measures, with its threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Keep groups whose combined average error rate is at most `threshold`.
    AverageErrorRate {
        /// Highest acceptable average error probability
        threshold: f64,
        /// ASCII value of Q0
        phred_offset: u8,
    },
    /// Keep groups whose combined median quality is at least `threshold`.
    MedianQuality {
        /// Lowest acceptable median Phred score
        threshold: f64,
        /// ASCII value of Q0
        phred_offset: u8,
    },
    /// Keep groups in which at least one mate has `threshold` or more bases.
    MinimumLength {
        /// Minimum number of bases
        threshold: usize,
    },
    /// Keep groups in which no mate has more than `threshold` bases.
    MaximumLength {
        /// Maximum number of bases
        threshold: usize,
    },
}

impl FilterKind {
    /// Short label used in logs and metrics files.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AverageErrorRate { .. } => "average_error_rate",
            Self::MedianQuality { .. } => "median_quality",
            Self::MinimumLength { .. } => "min_length",
            Self::MaximumLength { .. } => "max_length",
        }
    }

    /// Threshold as a float, for reporting.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        match *self {
            Self::AverageErrorRate { threshold, .. } | Self::MedianQuality { threshold, .. } => {
                threshold
            }
            Self::MinimumLength { threshold } | Self::MaximumLength { threshold } => {
                threshold as f64
            }
        }
    }

    /// Phred offset for quality filters, `None` for length filters.
    #[must_use]
    pub fn phred_offset(&self) -> Option<u8> {
        match *self {
            Self::AverageErrorRate { phred_offset, .. }
            | Self::MedianQuality { phred_offset, .. } => Some(phred_offset),
            Self::MinimumLength { .. } | Self::MaximumLength { .. } => None,
        }
    }

    /// True for filters that read quality strings.
    #[must_use]
    pub fn uses_qualities(&self) -> bool {
        self.phred_offset().is_some()
    }

    /// Why a group failing this filter was rejected.
    #[must_use]
    pub fn rejection_reason(&self) -> RejectionReason {
        match self {
            Self::AverageErrorRate { .. } => RejectionReason::ExcessiveErrorRate,
            Self::MedianQuality { .. } => RejectionReason::LowMedianQuality,
            Self::MinimumLength { .. } => RejectionReason::TooShort,
            Self::MaximumLength { .. } => RejectionReason::TooLong,
        }
    }

    /// Checks the Phred offset and threshold.
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidParameter`] if the offset is above 126 or a
    /// quality threshold is NaN.
    pub fn validate(&self) -> Result<()> {
        if let Some(offset) = self.phred_offset() {
            validate_phred_offset(offset)?;
        }
        match *self {
            Self::AverageErrorRate { threshold, .. } | Self::MedianQuality { threshold, .. }
                if threshold.is_nan() =>
            {
                Err(FilterError::InvalidParameter {
                    parameter: self.name().to_string(),
                    reason: "threshold must be a number, got NaN".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MinimumLength { threshold } | Self::MaximumLength { threshold } => {
                write!(f, "{}({threshold})", self.name())
            }
            Self::AverageErrorRate { threshold, phred_offset }
            | Self::MedianQuality { threshold, phred_offset } => {
                write!(f, "{}({threshold}, offset={phred_offset})", self.name())
            }
        }
    }
}

/// Running totals for one filter.
///
/// Counts from filters that evaluated disjoint inputs (e.g. one per worker) can be
/// combined with `+`, `+=` or [`Sum`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterCounts {
    /// Groups evaluated
    pub total: u64,
    /// Groups that passed
    pub passed: u64,
}

impl FilterCounts {
    /// Creates counts from raw totals. `passed` should not exceed `total`.
    #[must_use]
    pub fn new(total: u64, passed: u64) -> Self {
        Self { total, passed }
    }

    /// Records one evaluation.
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        }
    }

    /// Groups that failed; zero if `passed` somehow exceeds `total`.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.total_filtered()
    }

    /// Merges another set of counts into this one.
    pub fn merge(&mut self, other: &FilterCounts) {
        *self += *other;
    }
}

impl ProcessingMetrics for FilterCounts {
    fn total_input(&self) -> u64 {
        self.total
    }

    fn total_output(&self) -> u64 {
        self.passed
    }
}

impl Add for FilterCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { total: self.total + rhs.total, passed: self.passed + rhs.passed }
    }
}

impl AddAssign for FilterCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.passed += rhs.passed;
    }
}

impl Sum for FilterCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A threshold filter with pass/fail counters.
///
/// Evaluation takes `&mut self`, so one instance cannot be shared between threads
/// without synchronisation; use one filter per worker and sum their
/// [`counts`](Self::counts).
#[derive(Debug, Clone)]
pub struct ReadFilter<A: RecordAccessor> {
    kind: FilterKind,
    accessor: A,
    counts: FilterCounts,
}

impl<A: RecordAccessor> ReadFilter<A> {
    /// Creates a filter of the given kind.
    ///
    /// # Errors
    /// See [`FilterKind::validate`].
    pub fn new(kind: FilterKind, accessor: A) -> Result<Self> {
        kind.validate()?;
        Ok(Self { kind, accessor, counts: FilterCounts::default() })
    }

    /// Average error rate filter.
    ///
    /// # Errors
    /// See [`FilterKind::validate`].
    pub fn average_error_rate(threshold: f64, phred_offset: u8, accessor: A) -> Result<Self> {
        Self::new(FilterKind::AverageErrorRate { threshold, phred_offset }, accessor)
    }

    /// Median quality filter.
    ///
    /// # Errors
    /// See [`FilterKind::validate`].
    pub fn median_quality(threshold: f64, phred_offset: u8, accessor: A) -> Result<Self> {
        Self::new(FilterKind::MedianQuality { threshold, phred_offset }, accessor)
    }

    /// Minimum length filter.
    pub fn minimum_length(threshold: usize, accessor: A) -> Self {
        let kind = FilterKind::MinimumLength { threshold };
        Self { kind, accessor, counts: FilterCounts::default() }
    }

    /// Maximum length filter.
    pub fn maximum_length(threshold: usize, accessor: A) -> Self {
        let kind = FilterKind::MaximumLength { threshold };
        Self { kind, accessor, counts: FilterCounts::default() }
    }

    /// Evaluates a group of mate records, updating the counters on success.
    ///
    /// # Errors
    /// - [`FilterError::NonAscii`] if a sequence or quality string is not ASCII
    /// - [`FilterError::PhredOutOfRange`] if a quality byte is outside `[offset, 126]`
    /// - [`FilterError::MissingQualities`] if a quality filter sees a record without
    ///   qualities
    ///
    /// The counters are untouched when an error is returned.
    pub fn evaluate(&mut self, records: &[A::Record]) -> Result<bool> {
        let passed = self.passes(records)?;
        self.counts.record(passed);
        Ok(passed)
    }

    /// Evaluates a single-end record.
    ///
    /// # Errors
    /// See [`evaluate`](Self::evaluate).
    pub fn evaluate_one(&mut self, record: &A::Record) -> Result<bool> {
        self.evaluate(std::slice::from_ref(record))
    }

    fn passes(&self, records: &[A::Record]) -> Result<bool> {
        match self.kind {
            FilterKind::MinimumLength { threshold } => {
                let mut any = false;
                for record in records {
                    any |= self.sequence_len(record)? >= threshold;
                }
                Ok(any)
            }
            FilterKind::MaximumLength { threshold } => {
                let mut all = true;
                for record in records {
                    all &= self.sequence_len(record)? <= threshold;
                }
                Ok(all)
            }
            FilterKind::AverageErrorRate { threshold, phred_offset } => {
                let mut acc = ErrorRateAccumulator::new(phred_offset);
                for record in records {
                    acc.add(self.qualities(record)?)?;
                }
                Ok(acc.average() <= threshold)
            }
            FilterKind::MedianQuality { threshold, phred_offset } => {
                let mut histogram = QualityHistogram::new(phred_offset);
                for record in records {
                    histogram.add(self.qualities(record)?)?;
                }
                Ok(histogram.median()? >= threshold)
            }
        }
    }

    fn sequence_len(&self, record: &A::Record) -> Result<usize> {
        let sequence = self.accessor.sequence(record);
        check_ascii("sequence", sequence)?;
        Ok(sequence.len())
    }

    fn qualities<'r>(&self, record: &'r A::Record) -> Result<&'r [u8]> {
        self.accessor.qualities(record).ok_or_else(|| {
            let name = self.accessor.name(record).unwrap_or(&b"<unnamed>"[..]);
            FilterError::MissingQualities { record: String::from_utf8_lossy(name).into_owned() }
        })
    }

    /// The filter kind and threshold.
    #[must_use]
    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    /// The threshold as a float.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.kind.threshold()
    }

    /// Phred offset for quality filters, `None` for length filters.
    #[must_use]
    pub fn phred_offset(&self) -> Option<u8> {
        self.kind.phred_offset()
    }

    /// Short label of the filter kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Counts so far.
    #[must_use]
    pub fn counts(&self) -> FilterCounts {
        self.counts
    }

    /// Groups evaluated so far.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.total
    }

    /// Groups that passed so far.
    #[must_use]
    pub fn passed(&self) -> u64 {
        self.counts.passed
    }

    /// Metrics row for this filter.
    #[must_use]
    pub fn metric(&self) -> FilterMetric {
        FilterMetric::new(self.name(), self.threshold(), self.counts.total, self.counts.passed)
    }
}

/// An ordered list of filters applied with short-circuiting.
///
/// A group is kept only if every filter passes it. Evaluation stops at the first
/// failing filter, so later filters neither see that group nor count it.
#[derive(Debug, Clone)]
pub struct FilterChain<A: RecordAccessor> {
    filters: Vec<ReadFilter<A>>,
    counts: FilterCounts,
}

impl<A: RecordAccessor> Default for FilterChain<A> {
    fn default() -> Self {
        Self { filters: Vec::new(), counts: FilterCounts::default() }
    }
}

impl<A: RecordAccessor> FilterChain<A> {
    /// Creates an empty chain, which passes everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    pub fn push(&mut self, filter: ReadFilter<A>) {
        self.filters.push(filter);
    }

    /// Evaluates a group against every filter in order.
    ///
    /// # Errors
    /// Propagates the first error raised by a filter. Counters of filters that ran
    /// before the failing one keep their updates.
    pub fn evaluate(&mut self, records: &[A::Record]) -> Result<bool> {
        let rejected = self.first_failure(records)?;
        self.counts.record(rejected.is_none());
        Ok(rejected.is_none())
    }

    /// Evaluates a group, returning the kind of the first filter that rejected it.
    fn first_failure(&mut self, records: &[A::Record]) -> Result<Option<FilterKind>> {
        for filter in &mut self.filters {
            if !filter.evaluate(records)? {
                return Ok(Some(filter.kind));
            }
        }
        Ok(None)
    }

    /// Evaluates a group and reports why it was rejected, if it was.
    ///
    /// # Errors
    /// See [`evaluate`](Self::evaluate).
    pub fn rejection(&mut self, records: &[A::Record]) -> Result<Option<RejectionReason>> {
        let rejected = self.first_failure(records)?;
        self.counts.record(rejected.is_none());
        Ok(rejected.map(|kind| kind.rejection_reason()))
    }

    /// The filters in application order.
    #[must_use]
    pub fn filters(&self) -> &[ReadFilter<A>] {
        &self.filters
    }

    /// Number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True if the chain has no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Counts for the chain as a whole.
    #[must_use]
    pub fn counts(&self) -> FilterCounts {
        self.counts
    }

    /// One metrics row per filter, in application order.
    #[must_use]
    pub fn metrics(&self) -> Vec<FilterMetric> {
        self.filters.iter().map(ReadFilter::metric).collect()
    }
}
