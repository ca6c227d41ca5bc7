//! Builders for small FASTQ files.

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Output};

/// Formats `(name, sequence, qualities)` triples as FASTQ text.
pub fn fastq_text(records: &[(&str, &str, &str)]) -> String {
    records.iter().map(|(name, seq, qual)| format!("@{name}\n{seq}\n+\n{qual}\n")).collect()
}

/// Writes records to a plain FASTQ file.
pub fn write_fastq(path: &Path, records: &[(&str, &str, &str)]) {
    fs::write(path, fastq_text(records)).expect("Failed to write FASTQ");
}

/// Writes records to a gzip-compressed FASTQ file.
pub fn write_fastq_gz(path: &Path, records: &[(&str, &str, &str)]) {
    let file = fs::File::create(path).expect("Failed to create FASTQ");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(fastq_text(records).as_bytes()).expect("Failed to write FASTQ");
    encoder.finish().expect("Failed to finish gzip stream");
}

/// Reads a FASTQ file, decompressing it if it is gzipped.
pub fn read_output(path: &Path) -> String {
    let bytes = fs::read(path).expect("Failed to read output");
    if bytes.starts_with(&[0x1f, 0x8b]) {
        let mut text = String::new();
        MultiGzDecoder::new(&bytes[..]).read_to_string(&mut text).expect("Invalid gzip output");
        text
    } else {
        String::from_utf8(bytes).expect("Output is not UTF-8")
    }
}

/// Runs the fastq-filter binary with `args`.
pub fn run_filter(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fastq-filter"))
        .args(args)
        .output()
        .expect("Failed to run fastq-filter")
}

/// Converts a path to `&str` for use as an argument.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("Non UTF-8 temp path")
}
