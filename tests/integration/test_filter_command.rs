//! End-to-end CLI tests for filtering.
//!
//! These tests run the actual `fastq-filter` binary and validate:
//! 1. Single-end filtering by length and quality
//! 2. Paired filtering where mates are kept or removed together
//! 3. Gzip input and output
//! 4. Metrics output

use std::fs;
use std::io::Write;
use std::process::Stdio;
use tempfile::TempDir;

use crate::helpers::{arg, read_output, run_filter, write_fastq, write_fastq_gz};

#[test]
fn test_mean_quality_and_min_length() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fq");
    let output = temp_dir.path().join("output.fq");
    fs::write(&input, "@TEST\nAA\n+\nAA\n@TEST\nA\n+\n-\n@TEST\nA\n+\nA\n").unwrap();

    let result = run_filter(&["-q", "20", "-l", "2", "-o", arg(&output), arg(&input)]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(read_output(&output), "@TEST\nAA\n+\nAA\n");
}

#[test]
fn test_defaults_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fq");
    write_fastq(&input, &[("r1", "ACGTACGT", "IIIIIIII"), ("r2", "ACGTACGT", "########")]);

    let result = run_filter(&["-Q", "30", arg(&input)]);
    assert!(result.status.success());
    assert_eq!(String::from_utf8(result.stdout).unwrap(), "@r1\nACGTACGT\n+\nIIIIIIII\n");
}

#[test]
fn test_reads_stdin() {
    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_fastq-filter"))
        .args(["-L", "4", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"@a\nACGT\n+\nIIII\n@b\nACGTA\n+\nIIIII\n").unwrap();
    let result = child.wait_with_output().unwrap();
    assert!(result.status.success());
    assert_eq!(String::from_utf8(result.stdout).unwrap(), "@a\nACGT\n+\nIIII\n");
}

#[test]
fn test_no_filters_keeps_everything() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fq");
    let output = temp_dir.path().join("output.fq");
    let records = [("r1", "A", "!"), ("r2", "ACGT", "IIII")];
    write_fastq(&input, &records);

    let result = run_filter(&["-o", arg(&output), arg(&input)]);
    assert!(result.status.success());
    assert_eq!(read_output(&output), fs::read_to_string(&input).unwrap());
}

#[test]
fn test_paired_mates_kept_together() {
    let temp_dir = TempDir::new().unwrap();
    let r1 = temp_dir.path().join("r1.fq");
    let r2 = temp_dir.path().join("r2.fq");
    let out1 = temp_dir.path().join("out1.fq");
    let out2 = temp_dir.path().join("out2.fq");

    // pair1: R2 is short but R1 satisfies the minimum
    // pair2: both mates are short
    // pair3: R1 is too long for the maximum
    write_fastq(
        &r1,
        &[
            ("pair1/1", "ACGTAC", "IIIIII"),
            ("pair2/1", "AC", "II"),
            ("pair3/1", "ACGTACGTAC", "IIIIIIIIII"),
        ],
    );
    write_fastq(
        &r2,
        &[("pair1/2", "AC", "II"), ("pair2/2", "AC", "II"), ("pair3/2", "ACGTAC", "IIIIII")],
    );

    let result = run_filter(&[
        "-l", "5", "-L", "8", "-o", arg(&out1), "-o", arg(&out2), arg(&r1), arg(&r2),
    ]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(read_output(&out1), "@pair1/1\nACGTAC\n+\nIIIIII\n");
    assert_eq!(read_output(&out2), "@pair1/2\nAC\n+\nII\n");
}

#[test]
fn test_paired_quality_pools_both_mates() {
    let temp_dir = TempDir::new().unwrap();
    let r1 = temp_dir.path().join("r1.fq");
    let r2 = temp_dir.path().join("r2.fq");
    let out1 = temp_dir.path().join("out1.fq");
    let out2 = temp_dir.path().join("out2.fq");

    // Median of the pooled scores [40, 40, 40, 2] is 40 even though R2 alone is Q2
    write_fastq(&r1, &[("frag 1:N:0", "ACG", "III")]);
    write_fastq(&r2, &[("frag 2:N:0", "A", "#")]);

    let result =
        run_filter(&["-Q", "30", "-o", arg(&out1), "-o", arg(&out2), arg(&r1), arg(&r2)]);
    assert!(result.status.success());
    assert_eq!(read_output(&out1), "@frag 1:N:0\nACG\n+\nIII\n");
    assert_eq!(read_output(&out2), "@frag 2:N:0\nA\n+\n#\n");
}

#[test]
fn test_gzip_input_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fq.gz");
    let output = temp_dir.path().join("output.fq.gz");
    write_fastq_gz(&input, &[("good", "ACGT", "IIII"), ("bad", "ACGT", "!!!!")]);

    let result =
        run_filter(&["-e", "0.001", "-c", "6", "-o", arg(&output), arg(&input)]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let raw = fs::read(&output).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b], "output should be gzip-compressed");
    assert_eq!(read_output(&output), "@good\nACGT\n+\nIIII\n");
}

#[test]
fn test_metrics_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fq");
    let output = temp_dir.path().join("output.fq");
    let metrics = temp_dir.path().join("metrics.tsv");
    write_fastq(
        &input,
        &[
            ("r1", "A", "I"),
            ("r2", "ACGT", "!!!!"),
            ("r3", "ACGT", "IIII"),
            ("r4", "ACGTA", "IIIII"),
        ],
    );

    let result = run_filter(&[
        "-l", "2", "-Q", "20", "-m", arg(&metrics), "-o", arg(&output), arg(&input),
    ]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let tsv = fs::read_to_string(&metrics).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 3, "{tsv}");
    assert!(lines[0].starts_with("filter\tthreshold\ttotal\tpassed\tfailed"), "{tsv}");

    let min_length: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(min_length[0], "min_length");
    assert_eq!(&min_length[2..5], &["4", "3", "1"]);
    assert_eq!(min_length[5], "0.750000");

    // Only the three survivors of min_length reach the median filter
    let median: Vec<&str> = lines[2].split('\t').collect();
    assert_eq!(median[0], "median_quality");
    assert_eq!(&median[2..5], &["3", "2", "1"]);
}

#[test]
fn test_custom_phred_offset() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fq");
    let output = temp_dir.path().join("output.fq");
    // Phred+64: 'h' is Q40, 'B' is Q2
    write_fastq(&input, &[("hi", "ACGT", "hhhh"), ("lo", "ACGT", "BBBB")]);

    let result = run_filter(&[
        "--phred-offset", "64", "-Q", "30", "-o", arg(&output), arg(&input),
    ]);
    assert!(result.status.success());
    assert_eq!(read_output(&output), "@hi\nACGT\n+\nhhhh\n");
}
