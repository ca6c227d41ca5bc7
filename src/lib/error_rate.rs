//! Error-rate statistics over Phred-encoded quality strings.
//!
//! The average error rate of a read is the arithmetic mean of the per-base error
//! probabilities, which weights low-quality bases far more heavily than the mean
//! of the Phred scores would. [`quality_from_error_rate`] turns such an average
//! back into a single Phred-like score; that number is *not* the mean Phred score
//! of the read.

use crate::errors::Result;
use crate::phred::{PhredTable, check_ascii, decode_score, validate_phred_offset};

/// Running sum of error probabilities over one or more quality strings.
///
/// Mates of a fragment are combined by calling [`add`](Self::add) once per mate;
/// the result is identical to evaluating the concatenated quality strings.
///
/// # Examples
/// ```
/// use fastq_filter_lib::error_rate::ErrorRateAccumulator;
///
/// let mut acc = ErrorRateAccumulator::new(33);
/// acc.add(b"++")?;  // Q10, Q10
/// acc.add(b"5")?;   // Q20
/// assert_eq!(acc.len(), 3);
/// assert!((acc.average() - 0.21 / 3.0).abs() < 1e-12);
/// # Ok::<(), fastq_filter_lib::errors::FilterError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRateAccumulator {
    phred_offset: u8,
    sum: f64,
    len: usize,
}

impl ErrorRateAccumulator {
    /// Creates an empty accumulator for the given Phred offset.
    #[must_use]
    pub fn new(phred_offset: u8) -> Self {
        Self { phred_offset, sum: 0.0, len: 0 }
    }

    /// Adds every base of `phred_scores` to the running totals.
    ///
    /// On error the accumulator is left unchanged.
    ///
    /// # Errors
    /// - [`NonAscii`](crate::errors::FilterError::NonAscii) if the string is not ASCII
    /// - [`PhredOutOfRange`](crate::errors::FilterError::PhredOutOfRange) if a byte is
    ///   outside `[offset, 126]`
    pub fn add(&mut self, phred_scores: &[u8]) -> Result<()> {
        self.sum += sum_error_rate(phred_scores, self.phred_offset)?;
        self.len += phred_scores.len();
        Ok(())
    }

    /// Sum of the error probabilities seen so far.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of bases seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no bases have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mean error probability, or NaN if no bases have been added.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.len == 0 { f64::NAN } else { self.sum / self.len as f64 }
    }
}

/// Sums the error probabilities of every base in a quality string.
///
/// # Errors
/// - [`InvalidParameter`](crate::errors::FilterError::InvalidParameter) if the offset
///   is above 126
/// - [`NonAscii`](crate::errors::FilterError::NonAscii) if the string is not ASCII
/// - [`PhredOutOfRange`](crate::errors::FilterError::PhredOutOfRange) naming the first
///   byte outside `[offset, 126]`
pub fn sum_error_rate(phred_scores: &[u8], phred_offset: u8) -> Result<f64> {
    validate_phred_offset(phred_offset)?;
    check_ascii("phred_scores", phred_scores)?;
    let table = PhredTable::global();
    let mut total = 0.0;
    for &byte in phred_scores {
        total += table.error_rate(decode_score(byte, phred_offset)?);
    }
    Ok(total)
}

/// Average per-base error probability of a quality string.
///
/// Returns NaN for an empty string: the average of nothing is undefined, and NaN
/// compares false against every threshold so an empty read never passes a filter.
///
/// # Errors
/// Same as [`sum_error_rate`].
///
/// # Examples
/// ```
/// use fastq_filter_lib::error_rate::average_error_rate;
///
/// assert!((average_error_rate(b"IIII", 33)? - 1e-4).abs() < 1e-12);
/// assert_eq!(average_error_rate(b"!!!!", 33)?, 1.0);
/// assert!(average_error_rate(b"", 33)?.is_nan());
/// # Ok::<(), fastq_filter_lib::errors::FilterError>(())
/// ```
pub fn average_error_rate(phred_scores: &[u8], phred_offset: u8) -> Result<f64> {
    let mut acc = ErrorRateAccumulator::new(phred_offset);
    acc.add(phred_scores)?;
    Ok(acc.average())
}

/// Converts an error probability to a Phred-scaled quality: `-10 * log10(e)`.
///
/// NaN in, NaN out.
#[inline]
#[must_use]
pub fn quality_from_error_rate(error_rate: f64) -> f64 {
    -10.0 * error_rate.log10()
}

/// Phred-scaled quality of the average error rate of a quality string.
///
/// This is what filtering on a "mean quality" means: `-q 20` keeps reads whose
/// average error rate is at most 1%.
///
/// # Errors
/// Same as [`sum_error_rate`].
pub fn mean_quality(phred_scores: &[u8], phred_offset: u8) -> Result<f64> {
    Ok(quality_from_error_rate(average_error_rate(phred_scores, phred_offset)?))
}
