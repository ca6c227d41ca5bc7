//! Error path integration tests.
//!
//! These tests verify that the binary exits with an error, and a useful
//! message, for invalid arguments and malformed or unsynchronised input.

use tempfile::TempDir;

use crate::helpers::{arg, run_filter, write_fastq};

fn assert_fails_with(args: &[&str], expected: &str) {
    let result = run_filter(args);
    assert!(!result.status.success(), "expected failure for {args:?}");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains(expected), "expected '{expected}' in:\n{stderr}");
}

#[test]
fn test_mismatched_mate_names() {
    let temp_dir = TempDir::new().unwrap();
    let r1 = temp_dir.path().join("r1.fq");
    let r2 = temp_dir.path().join("r2.fq");
    write_fastq(&r1, &[("read1/1", "ACGT", "IIII")]);
    write_fastq(&r2, &[("other/2", "ACGT", "IIII")]);
    let out1 = temp_dir.path().join("o1.fq");
    let out2 = temp_dir.path().join("o2.fq");

    assert_fails_with(
        &["-o", arg(&out1), "-o", arg(&out2), arg(&r1), arg(&r2)],
        "Records are out of sync, names read1/1, other/2 do not match",
    );
}

#[test]
fn test_unequal_record_counts() {
    let temp_dir = TempDir::new().unwrap();
    let r1 = temp_dir.path().join("r1.fq");
    let r2 = temp_dir.path().join("r2.fq");
    write_fastq(&r1, &[("a/1", "ACGT", "IIII"), ("b/1", "ACGT", "IIII")]);
    write_fastq(&r2, &[("a/2", "ACGT", "IIII")]);
    let out1 = temp_dir.path().join("o1.fq");
    let out2 = temp_dir.path().join("o2.fq");

    assert_fails_with(
        &["-o", arg(&out1), "-o", arg(&out2), arg(&r1), arg(&r2)],
        "unequal number of FASTQ records",
    );
}

#[test]
fn test_unequal_input_and_output_counts() {
    let temp_dir = TempDir::new().unwrap();
    let r1 = temp_dir.path().join("r1.fq");
    let r2 = temp_dir.path().join("r2.fq");
    write_fastq(&r1, &[("a/1", "ACGT", "IIII")]);
    write_fastq(&r2, &[("a/2", "ACGT", "IIII")]);

    assert_fails_with(&[arg(&r1), arg(&r2)], "Number of inputs (2) and outputs (1)");
}

#[test]
fn test_missing_input() {
    assert_fails_with(&["/nonexistent/reads.fq"], "File does not exist");
}

#[test]
fn test_quality_below_offset() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fq");
    // ' ' (32) lies below the Phred+33 range
    write_fastq(&input, &[("bad", "ACGT", "II I")]);

    assert_fails_with(&["-q", "20", arg(&input)], "outside of valid phred range");
}

#[test]
fn test_min_length_above_max_length() {
    assert_fails_with(&["-l", "100", "-L", "50", "-"], "max-length");
}

#[test]
fn test_error_rate_out_of_range() {
    assert_fails_with(&["-e", "2", "-"], "average-error-rate");
}
