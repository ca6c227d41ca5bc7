//! Common CLI options shared across commands.
//!
//! Argument structures here are composed into command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use fastq_filter_lib::fastq::{DEFAULT_COMPRESSION_LEVEL, STDIO_PATH};
use fastq_filter_lib::validation::{
    validate_compression_level, validate_input_exists, validate_same_count,
};

/// FASTQ inputs and their matching outputs.
#[derive(Debug, Clone, Args)]
pub struct FastqIoOptions {
    /// Input FASTQ files, plain or gzip-compressed. Use `-` for stdin. Multiple files
    /// are read as mates of one another (R1, R2, ...).
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output FASTQ files, one per input, in input order. Names ending in `.gz` are
    /// gzip-compressed. Defaults to stdout for a single input.
    #[arg(short = 'o', long = "output")]
    pub outputs: Vec<PathBuf>,
}

impl FastqIoOptions {
    /// The output paths, defaulting to stdout when none were given.
    pub fn outputs(&self) -> Vec<PathBuf> {
        if self.outputs.is_empty() {
            vec![PathBuf::from(STDIO_PATH)]
        } else {
            self.outputs.clone()
        }
    }

    /// Validates that every input exists and that inputs and outputs pair up.
    ///
    /// # Errors
    ///
    /// Returns an error if an input is missing or the counts differ.
    pub fn validate(&self) -> Result<()> {
        for input in &self.inputs {
            validate_input_exists(input, "FASTQ")?;
        }
        validate_same_count(self.inputs.len(), self.outputs().len(), "inputs", "outputs")?;
        Ok(())
    }
}

/// Compression options for output files.
#[derive(Debug, Clone, Args)]
pub struct CompressionOptions {
    /// Gzip compression level for `.gz` outputs (0-9)
    #[arg(short = 'c', long = "compression-level", default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    pub compression_level: u32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self { compression_level: DEFAULT_COMPRESSION_LEVEL }
    }
}

impl CompressionOptions {
    /// Validates the compression level.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is above 9.
    pub fn validate(&self) -> Result<()> {
        validate_compression_level(self.compression_level)?;
        Ok(())
    }
}
