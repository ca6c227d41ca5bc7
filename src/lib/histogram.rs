//! Phred score histograms and the linear-time median.
//!
//! Scores live in a small fixed domain (`0..=126 - offset`), so counting them into
//! buckets and walking the buckets finds the median in O(n) without sorting.

use crate::errors::{FilterError, Result};
use crate::phred::{PhredScore, check_ascii, decode_score, max_score, validate_phred_offset};

/// Frequency table of Phred scores for one Phred offset.
///
/// Bucket `i` counts occurrences of score `i`. The table has `126 - offset + 1`
/// buckets so every valid score has a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityHistogram {
    phred_offset: u8,
    counts: Vec<u64>,
    total: u64,
}

impl QualityHistogram {
    /// Creates an empty histogram. An invalid offset is reported by [`add`](Self::add).
    #[must_use]
    pub fn new(phred_offset: u8) -> Self {
        Self { phred_offset, counts: vec![0; max_score(phred_offset) as usize + 1], total: 0 }
    }

    /// Builds a histogram from a single quality string.
    ///
    /// # Errors
    /// See [`add`](Self::add).
    pub fn build(phred_scores: &[u8], phred_offset: u8) -> Result<Self> {
        let mut histogram = Self::new(phred_offset);
        histogram.add(phred_scores)?;
        Ok(histogram)
    }

    /// Counts every score of `phred_scores` into the histogram.
    ///
    /// The string is validated in full before any bucket is touched, so on error
    /// the histogram is unchanged.
    ///
    /// # Errors
    /// - [`FilterError::InvalidParameter`] if the offset is above 126
    /// - [`FilterError::NonAscii`] if the string is not ASCII
    /// - [`FilterError::PhredOutOfRange`] naming the first byte outside `[offset, 126]`
    pub fn add(&mut self, phred_scores: &[u8]) -> Result<()> {
        validate_phred_offset(self.phred_offset)?;
        check_ascii("phred_scores", phred_scores)?;
        for &byte in phred_scores {
            decode_score(byte, self.phred_offset)?;
        }
        for &byte in phred_scores {
            self.counts[(byte - self.phred_offset) as usize] += 1;
        }
        self.total += phred_scores.len() as u64;
        Ok(())
    }

    /// Per-score counts, indexed by Phred score.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of scores counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for one score; zero for scores outside the domain.
    #[must_use]
    pub fn count(&self, score: PhredScore) -> u64 {
        self.counts.get(score as usize).copied().unwrap_or(0)
    }

    /// Median score, or NaN for an empty histogram.
    ///
    /// # Errors
    /// See [`median_from_histogram`].
    pub fn median(&self) -> Result<f64> {
        median_from_histogram(&self.counts, self.total)
    }
}

/// Builds a histogram from a quality string.
///
/// # Errors
/// See [`QualityHistogram::add`].
pub fn build_histogram(phred_scores: &[u8], phred_offset: u8) -> Result<QualityHistogram> {
    QualityHistogram::build(phred_scores, phred_offset)
}

/// Finds the median score of a histogram by walking its buckets in score order.
///
/// With an odd total the median is the middle score. With an even total it is the
/// lower middle score, unless the lower middle is the last score of its bucket, in
/// which case it is the exact mean of that score and the next non-empty bucket's
/// score (so the result may end in `.5`).
///
/// Returns NaN when `total_count` is zero.
///
/// # Errors
/// Returns [`FilterError::MedianNotFound`] if the buckets sum to less than
/// `total_count` (or the upper middle of an even split is missing). A histogram
/// built by [`QualityHistogram`] never triggers this.
///
/// # Examples
/// ```
/// use fastq_filter_lib::histogram::median_from_histogram;
///
/// // scores 1, 1, 2, 4
/// assert_eq!(median_from_histogram(&[0, 2, 1, 0, 1], 4)?, 1.5);
/// assert_eq!(median_from_histogram(&[0, 2, 1, 0, 1], 3)?, 1.0);
/// assert!(median_from_histogram(&[0, 0, 0], 0)?.is_nan());
/// # Ok::<(), fastq_filter_lib::errors::FilterError>(())
/// ```
pub fn median_from_histogram(counts: &[u64], total_count: u64) -> Result<f64> {
    if total_count == 0 {
        return Ok(f64::NAN);
    }
    let odd = total_count % 2 == 1;
    let target = total_count.div_ceil(2);

    let mut cumulative = 0u64;
    for (score, &count) in counts.iter().enumerate() {
        cumulative += count;
        if cumulative < target {
            continue;
        }
        if odd || cumulative > target {
            return Ok(score as f64);
        }
        // Even split on a bucket boundary: average with the next occupied score.
        return counts[score + 1..]
            .iter()
            .position(|&c| c > 0)
            .map(|next| (score as f64 + (score + 1 + next) as f64) / 2.0)
            .ok_or(FilterError::MedianNotFound { total: total_count });
    }
    Err(FilterError::MedianNotFound { total: total_count })
}

/// Median Phred score of a quality string; NaN for an empty string.
///
/// # Errors
/// Same as [`QualityHistogram::add`].
///
/// # Examples
/// ```
/// use fastq_filter_lib::histogram::median_quality;
///
/// assert_eq!(median_quality(b"IIII", 33)?, 40.0);
/// assert_eq!(median_quality(b"ABCD", 33)?, 33.5);
/// # Ok::<(), fastq_filter_lib::errors::FilterError>(())
/// ```
pub fn median_quality(phred_scores: &[u8], phred_offset: u8) -> Result<f64> {
    build_histogram(phred_scores, phred_offset)?.median()
}
