//! Integration tests for the fastq-filter binary.
//!
//! These tests run the compiled binary on temporary FASTQ files and check
//! the records it writes, the metrics it reports, and how it fails.

mod helpers;
mod test_error_paths;
mod test_filter_command;
