#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: quality statistics intentionally cast between integer counts and floats
// - missing_*_doc: error and panic sections are documented where they are not obvious
// - module_name_repetitions: types such as `FilterKind` live in `filter`
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # fastq-filter - quality control filters for sequencing reads
//!
//! This library computes quality statistics over FASTQ reads and decides, per read
//! or per read pair, whether the read should be kept.
//!
//! ## Overview
//!
//! ### Statistics
//!
//! - **[`phred`]** - Phred score decoding and the score-to-error-rate table
//! - **[`error_rate`]** - Average error rate and the "mean quality" derived from it
//! - **[`histogram`]** - Quality histograms and the linear-time median
//!
//! ### Filtering
//!
//! - **[`record`]** - Record types and the accessor trait filters read them through
//! - **[`filter`]** - Threshold filters, their counters, and filter chains
//!
//! ### Utilities
//!
//! - **[`fastq`]** - Gzip-aware FASTQ readers and writers, mate synchronisation
//! - **[`validation`]** - Parameter and input validation
//! - **[`progress`]** - Interval progress logging
//! - **[`logging`]** - Run summaries and formatting helpers
//! - **[`metrics`]** - Per-filter metrics and TSV output
//!
//! ## Quick Start
//!
//! ### Quality statistics
//!
//! ```
//! use fastq_filter_lib::error_rate::{average_error_rate, mean_quality};
//! use fastq_filter_lib::histogram::median_quality;
//!
//! # fn main() -> fastq_filter_lib::errors::Result<()> {
//! // Phred+33: 'I' is Q40, '!' is Q0
//! assert!((average_error_rate(b"IIII", 33)? - 1e-4).abs() < 1e-12);
//! assert!((mean_quality(b"IIII", 33)? - 40.0).abs() < 1e-9);
//! assert_eq!(median_quality(b"ABCD", 33)?, 33.5);
//! # Ok(())
//! # }
//! ```
//!
//! ### Filtering read pairs
//!
//! ```
//! use fastq_filter_lib::filter::{FilterChain, ReadFilter};
//! use fastq_filter_lib::record::{SequenceRecord, SequenceRecordAccessor};
//!
//! # fn main() -> fastq_filter_lib::errors::Result<()> {
//! let mut chain = FilterChain::new();
//! chain.push(ReadFilter::minimum_length(4, SequenceRecordAccessor));
//! chain.push(ReadFilter::median_quality(20.0, 33, SequenceRecordAccessor)?);
//!
//! // R2 is short, but R1 is long enough for the pair to pass
//! let pair = [SequenceRecord::new("r/1", "ACGT", "IIII"), SequenceRecord::new("r/2", "AC", "II")];
//! assert!(chain.evaluate(&pair)?);
//! # Ok(())
//! # }
//! ```

pub mod error_rate;
pub mod errors;
pub mod fastq;
pub mod filter;
pub mod histogram;
pub mod logging;
pub mod phred;
pub mod progress;
pub mod record;
pub mod validation;

pub use fastq_filter_metrics as metrics;

pub use error_rate::{average_error_rate, mean_quality};
pub use errors::{FilterError, Result};
pub use filter::{FilterChain, FilterCounts, FilterKind, ReadFilter};
pub use histogram::median_quality;
pub use metrics::{FilterMetric, RejectionReason};
pub use record::{FastqRecordAccessor, RecordAccessor, SequenceRecord, SequenceRecordAccessor};
