//! Filter FASTQ reads by length and base quality.
//!
//! Reads from every input are processed as one group (a single read, or a read pair).
//! A group is kept only if it passes every configured filter, and then all of its mates
//! are written to their matching outputs.

use anyhow::{Context, Result, bail};
use clap::Parser;
use fastq_filter_lib::fastq::{MateReader, open_writer, write_record};
use fastq_filter_lib::filter::{FilterChain, ReadFilter};
use fastq_filter_lib::logging::{OperationTimer, log_filter_summary};
use fastq_filter_lib::metrics::writer::write_metrics_auto;
use fastq_filter_lib::phred::{DEFAULT_PHRED_OFFSET, validate_phred_offset};
use fastq_filter_lib::progress::ProgressTracker;
use fastq_filter_lib::record::FastqRecordAccessor;
use fastq_filter_lib::validation::{validate_error_rate, validate_min_max};
use log::{info, warn};
use seq_io::fastq::Record;
use std::io::Write;
use std::path::PathBuf;

use crate::commands::command::Command;
use crate::commands::common::{CompressionOptions, FastqIoOptions};

/// Filter FASTQ reads by length and base quality.
#[derive(Debug, Parser)]
#[command(
    about = "Filter FASTQ reads by length and base quality",
    long_about = r#"
Filter single-end or paired FASTQ files by read length and base quality.

Multiple inputs are read as mates (R1, R2, ...): one record is taken from each
input at a time and the group is kept or removed as a whole. Mate names must
match and all inputs must hold the same number of records.

Filters are applied cheapest first and a group stops at the first filter it
fails:

  1. --min-length: kept if ANY mate is at least this long
  2. --max-length: kept only if EVERY mate is at most this long
  3. --average-error-rate: kept if the error rate over all mates is at most this
  4. --mean-quality: as --average-error-rate, with rate 10^(-Q/10)
  5. --median-quality: kept if the median quality over all mates is at least this

EXAMPLES:

  # Keep reads with a mean quality of at least 20 and a length of at least 50
  fastq-filter -q 20 -l 50 -o filtered.fq.gz reads.fq.gz

  # Filter a read pair, writing per-filter counts
  fastq-filter -Q 25 -o r1.out.fq.gz -o r2.out.fq.gz -m metrics.tsv r1.fq.gz r2.fq.gz
"#
)]
pub struct FilterFastq {
    /// Input and output FASTQ files
    #[command(flatten)]
    pub io: FastqIoOptions,

    /// Minimum read length; at least one mate must be this long
    #[arg(short = 'l', long = "min-length")]
    pub min_length: Option<usize>,

    /// Maximum read length; every mate must be at most this long
    #[arg(short = 'L', long = "max-length")]
    pub max_length: Option<usize>,

    /// Maximum average error rate over all bases, between 0 and 1
    #[arg(short = 'e', long = "average-error-rate")]
    pub average_error_rate: Option<f64>,

    /// Minimum mean quality, computed from the average error rate
    #[arg(short = 'q', long = "mean-quality")]
    pub mean_quality: Option<f64>,

    /// Minimum median base quality
    #[arg(short = 'Q', long = "median-quality")]
    pub median_quality: Option<f64>,

    /// ASCII offset of the quality encoding
    #[arg(long = "phred-offset", default_value_t = DEFAULT_PHRED_OFFSET)]
    pub phred_offset: u8,

    /// Optional output TSV with per-filter counts
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,

    /// Compression options for gzip outputs
    #[command(flatten)]
    pub compression: CompressionOptions,
}

/// Converts a Phred-scaled quality into the error rate it stands for.
fn quality_to_error_rate(quality: f64) -> f64 {
    10f64.powf(-quality / 10.0)
}

impl FilterFastq {
    /// Checks the options for consistency before any file is opened.
    fn validate(&self) -> Result<()> {
        self.io.validate()?;
        self.compression.validate()?;
        validate_phred_offset(self.phred_offset)?;
        validate_min_max(self.min_length, self.max_length, "min-length", "max-length")?;
        if let Some(rate) = self.average_error_rate {
            validate_error_rate(rate, "average-error-rate")?;
        }
        for (name, quality) in
            [("mean-quality", self.mean_quality), ("median-quality", self.median_quality)]
        {
            if let Some(quality) = quality {
                if !quality.is_finite() || quality < 0.0 {
                    bail!("--{name} must be a non-negative number, got {quality}");
                }
            }
        }
        Ok(())
    }

    /// Builds the filter chain, cheapest filters first.
    fn build_chain(&self) -> Result<FilterChain<FastqRecordAccessor>> {
        let offset = self.phred_offset;
        let mut chain = FilterChain::new();
        if let Some(length) = self.min_length {
            chain.push(ReadFilter::minimum_length(length, FastqRecordAccessor));
        }
        if let Some(length) = self.max_length {
            chain.push(ReadFilter::maximum_length(length, FastqRecordAccessor));
        }
        if let Some(rate) = self.average_error_rate {
            chain.push(ReadFilter::average_error_rate(rate, offset, FastqRecordAccessor)?);
        }
        if let Some(quality) = self.mean_quality {
            let rate = quality_to_error_rate(quality);
            chain.push(ReadFilter::average_error_rate(rate, offset, FastqRecordAccessor)?);
        }
        if let Some(quality) = self.median_quality {
            chain.push(ReadFilter::median_quality(quality, offset, FastqRecordAccessor)?);
        }
        Ok(chain)
    }
}

impl Command for FilterFastq {
    fn execute(&self) -> Result<()> {
        self.validate()?;
        let mut chain = self.build_chain()?;
        let outputs = self.io.outputs();

        info!("Starting filter");
        for (input, output) in self.io.inputs.iter().zip(&outputs) {
            info!("  {} -> {}", input.display(), output.display());
        }
        if chain.is_empty() {
            warn!("No filters configured; all reads will be kept");
        }
        for filter in chain.filters() {
            info!("  Filter: {}", filter.kind());
        }

        let timer = OperationTimer::new("Filtering reads");
        let progress = ProgressTracker::new("Processed read groups");

        let reader = MateReader::open(&self.io.inputs)?;
        let mut writers = outputs
            .iter()
            .map(|path| open_writer(path, self.compression.compression_level))
            .collect::<Result<Vec<_>>>()?;

        for group in reader {
            let group = group?;
            let keep = chain.evaluate(&group).with_context(|| {
                let name = group.first().map(|r| r.head()).unwrap_or_default();
                format!("Failed to filter record '{}'", String::from_utf8_lossy(name))
            })?;
            if keep {
                for (record, writer) in group.iter().zip(writers.iter_mut()) {
                    write_record(writer, record)?;
                }
            }
            progress.log_if_needed(1);
        }

        for (writer, path) in writers.iter_mut().zip(&outputs) {
            writer.flush().with_context(|| format!("Failed to write {}", path.display()))?;
        }
        progress.log_final();

        log_filter_summary(&chain);
        if let Some(path) = &self.metrics {
            write_metrics_auto(path, &chain.metrics())?;
            info!("Wrote filter metrics to {}", path.display());
        }
        timer.log_completion(chain.counts().total);
        Ok(())
    }
}
