//! Phred score decoding and the score-to-error-rate lookup table.
//!
//! A Phred score Q relates to the probability P that a base call is wrong by
//! `Q = -10 * log10(P)`, so `P = 10^(-Q/10)`. Quality strings store each score as
//! a single printable ASCII byte `offset + Q`. With the canonical offset of 33
//! (Sanger / Illumina 1.8+) the valid bytes are `'!'` (Q0) through `'~'` (Q93).
//!
//! The error probabilities are computed once into a [`PhredTable`] and only read
//! afterwards, so lookups are a single array index and the table can be shared
//! freely between threads.

use std::sync::LazyLock;

use crate::errors::{FilterError, Result};

/// Default Phred offset (Sanger / Illumina 1.8+ encoding)
pub const DEFAULT_PHRED_OFFSET: u8 = 33;

/// Highest byte that may appear in a quality string (`'~'`)
pub const MAX_PHRED_ASCII: u8 = 126;

/// Highest Phred score representable with the default offset
pub const MAX_PHRED: u8 = MAX_PHRED_ASCII - DEFAULT_PHRED_OFFSET;

/// Number of entries in the lookup table; covers every score an offset of 0 can produce.
const TABLE_SIZE: usize = MAX_PHRED_ASCII as usize + 1;

/// Phred score type
pub type PhredScore = u8;

static PHRED_TABLE: LazyLock<PhredTable> = LazyLock::new(PhredTable::new);

/// Precomputed map from Phred score to error probability.
#[derive(Debug, Clone)]
pub struct PhredTable {
    error_rates: [f64; TABLE_SIZE],
}

impl PhredTable {
    /// Builds the table for scores `0..=126`.
    #[must_use]
    pub fn new() -> Self {
        let mut error_rates = [0.0; TABLE_SIZE];
        for (score, rate) in error_rates.iter_mut().enumerate() {
            *rate = 10.0_f64.powf(-(score as f64) / 10.0);
        }
        Self { error_rates }
    }

    /// Returns the process-wide table, building it on first use.
    #[must_use]
    pub fn global() -> &'static PhredTable {
        &PHRED_TABLE
    }

    /// Error probability for `score`.
    ///
    /// # Panics
    ///
    /// Panics if `score > 126`. Scores produced by [`decode_score`] never are.
    #[inline]
    #[must_use]
    pub fn error_rate(&self, score: PhredScore) -> f64 {
        self.error_rates[score as usize]
    }
}

impl Default for PhredTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a Phred score to its error probability using the global table.
///
/// # Examples
/// ```
/// use fastq_filter_lib::phred::score_to_error_rate;
///
/// assert!((score_to_error_rate(10) - 0.1).abs() < 1e-12);
/// assert!((score_to_error_rate(30) - 0.001).abs() < 1e-12);
/// assert_eq!(score_to_error_rate(0), 1.0);
/// ```
#[inline]
#[must_use]
pub fn score_to_error_rate(score: PhredScore) -> f64 {
    PhredTable::global().error_rate(score)
}

/// Highest valid Phred score for the given offset (`126 - offset`), or 0 for
/// offsets above 126, which [`validate_phred_offset`] rejects.
#[inline]
#[must_use]
pub fn max_score(phred_offset: u8) -> PhredScore {
    MAX_PHRED_ASCII.saturating_sub(phred_offset)
}

/// Checks that a Phred offset lies in `[0, 126]`.
///
/// # Errors
/// Returns [`FilterError::InvalidParameter`] for offsets above 126.
pub fn validate_phred_offset(phred_offset: u8) -> Result<()> {
    if phred_offset > MAX_PHRED_ASCII {
        return Err(FilterError::InvalidParameter {
            parameter: "phred_offset".to_string(),
            reason: format!("must be between 0 and {MAX_PHRED_ASCII}, got {phred_offset}"),
        });
    }
    Ok(())
}

/// Decodes one quality byte into a Phred score.
///
/// # Errors
/// Returns [`FilterError::PhredOutOfRange`] if `byte` lies outside `[offset, 126]`.
///
/// # Examples
/// ```
/// use fastq_filter_lib::phred::decode_score;
///
/// assert_eq!(decode_score(b'I', 33).unwrap(), 40);
/// assert!(decode_score(b' ', 33).is_err());
/// ```
#[inline]
pub fn decode_score(byte: u8, phred_offset: u8) -> Result<PhredScore> {
    let score = byte.wrapping_sub(phred_offset);
    if byte < phred_offset || byte > MAX_PHRED_ASCII {
        return Err(FilterError::PhredOutOfRange {
            character: byte,
            offset: phred_offset,
            max: MAX_PHRED_ASCII,
        });
    }
    Ok(score)
}

/// Rejects quality strings containing non-ASCII bytes.
pub(crate) fn check_ascii(field: &'static str, bytes: &[u8]) -> Result<()> {
    if bytes.is_ascii() { Ok(()) } else { Err(FilterError::NonAscii { field }) }
}
