//! FASTQ input and output.
//!
//! Inputs may be plain or gzip-compressed; compression is detected from the gzip
//! magic bytes rather than the file name, so `-` (stdin) works for either. Outputs
//! are gzip-compressed when their name ends in `.gz`, and `-` writes to stdout.
//!
//! Paired (or multi-mate) input is read with [`MateReader`], which steps all
//! inputs in lock-step and checks that mates belong together.
//!
//! # Example
//!
//! ```no_run
//! use fastq_filter_lib::fastq::{MateReader, open_writer, write_record};
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let inputs = vec![PathBuf::from("r1.fq.gz"), PathBuf::from("r2.fq.gz")];
//! let mut writers = vec![open_writer("r1.out.fq.gz", 2)?, open_writer("r2.out.fq.gz", 2)?];
//!
//! for group in MateReader::open(&inputs)? {
//!     for (record, writer) in group?.iter().zip(writers.iter_mut()) {
//!         write_record(writer, record)?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use fgoxide::io::Io;
use log::debug;
use seq_io::fastq::Reader as FastqReader;
use seq_io::fastq::{OwnedRecord, Record};

use crate::errors::FilterError;
use crate::record::names_are_mates;

/// Path that stands for stdin (inputs) or stdout (outputs).
pub const STDIO_PATH: &str = "-";

/// Buffer size for readers and writers.
pub const BUFFER_SIZE: usize = 1024 * 1024;

/// Default gzip level for compressed outputs.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 2;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Boxed reader type shared by all FASTQ inputs.
pub type FastqSource = FastqReader<Box<dyn BufRead + Send>>;

/// True if `path` is the stdin/stdout placeholder.
#[must_use]
pub fn is_stdio<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().as_os_str() == STDIO_PATH
}

/// Opens a possibly gzip-compressed input; `-` reads stdin.
///
/// # Errors
/// Returns an error if the file cannot be opened or its first bytes cannot be read.
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();
    let source: Box<dyn Read + Send> = if is_stdio(path) {
        Box::new(std::io::stdin())
    } else {
        Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )
    };

    let mut reader = BufReader::with_capacity(BUFFER_SIZE, source);
    let is_gzip = reader
        .fill_buf()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .starts_with(&GZIP_MAGIC);

    if is_gzip {
        debug!("Detected gzip-compressed input: {}", path.display());
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, MultiGzDecoder::new(reader))))
    } else {
        debug!("Detected uncompressed input: {}", path.display());
        Ok(Box::new(reader))
    }
}

/// Opens a FASTQ parser over [`open_reader`].
///
/// # Errors
/// See [`open_reader`].
pub fn open_fastq<P: AsRef<Path>>(path: P) -> Result<FastqSource> {
    Ok(FastqReader::with_capacity(open_reader(path)?, BUFFER_SIZE))
}

/// Opens an output; `.gz` paths are gzip-compressed at `compression_level` and `-`
/// writes to stdout.
///
/// # Errors
/// Returns an error if the file cannot be created.
pub fn open_writer<P: AsRef<Path>>(
    path: P,
    compression_level: u32,
) -> Result<Box<dyn Write + Send>> {
    let path = path.as_ref();
    if is_stdio(path) {
        return Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, std::io::stdout())));
    }
    let writer = Io::new(compression_level, BUFFER_SIZE)
        .new_writer(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(Box::new(writer))
}

/// Writes one record in four-line FASTQ format.
///
/// # Errors
/// Returns an error if the underlying writer fails.
pub fn write_record<W: Write + ?Sized>(writer: &mut W, record: &OwnedRecord) -> Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(record.head())?;
    writer.write_all(b"\n")?;
    writer.write_all(record.seq())?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(record.qual())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Reads one record from each input at a time.
///
/// Yields a `Vec` with one record per input, in input order. Iteration ends with an
/// error if mates' names do not match or if the inputs hold different numbers of
/// records, and stops after the first error.
pub struct MateReader {
    sources: Vec<FastqSource>,
    paths: Vec<PathBuf>,
    done: bool,
}

impl MateReader {
    /// Wraps already-open FASTQ readers. `paths` label the readers in errors.
    #[must_use]
    pub fn new(sources: Vec<FastqSource>, paths: Vec<PathBuf>) -> Self {
        Self { sources, paths, done: false }
    }

    /// Opens every path with [`open_fastq`].
    ///
    /// # Errors
    /// Returns the first error from opening an input.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let sources = paths.iter().map(open_fastq).collect::<Result<Vec<_>>>()?;
        let paths = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        Ok(Self::new(sources, paths))
    }

    /// Number of inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True if there are no inputs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn read_group(&mut self) -> Result<Option<Vec<OwnedRecord>>> {
        let mut records = Vec::with_capacity(self.sources.len());
        let mut exhausted = Vec::new();
        let paths = &self.paths;

        for (index, source) in self.sources.iter_mut().enumerate() {
            match source.next() {
                Some(result) => {
                    let record = result.with_context(|| {
                        format!("Failed to parse FASTQ record from {}", path_label(paths, index))
                    })?;
                    records.push(record.to_owned_record());
                }
                None => exhausted.push(index),
            }
        }

        if exhausted.len() == self.sources.len() {
            return Ok(None);
        }
        if let Some(&index) = exhausted.first() {
            return Err(FilterError::InvalidFileFormat {
                file_type: "FASTQ".to_string(),
                path: path_label(&self.paths, index),
                reason: "Input files have an unequal number of FASTQ records".to_string(),
            }
            .into());
        }

        if !names_are_mates(records.iter().map(Record::head)) {
            let names: Vec<_> =
                records.iter().map(|r| String::from_utf8_lossy(r.head()).into_owned()).collect();
            return Err(FilterError::InvalidFileFormat {
                file_type: "FASTQ".to_string(),
                path: path_label(&self.paths, 0),
                reason: format!("Records are out of sync, names {} do not match", names.join(", ")),
            }
            .into());
        }

        Ok(Some(records))
    }
}

fn path_label(paths: &[PathBuf], index: usize) -> String {
    paths.get(index).map_or_else(|| format!("input {index}"), |p| p.display().to_string())
}

impl Iterator for MateReader {
    type Item = Result<Vec<OwnedRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_group() {
            Ok(Some(records)) => Some(Ok(records)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
