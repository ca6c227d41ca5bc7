//! Sequencing records and the accessor seam filters read them through.
//!
//! Filters never assume a concrete record layout. Instead a [`RecordAccessor`] is
//! supplied when a filter is built, which exposes the sequence, quality string and
//! (optionally) name of whatever record type the caller works with. Two accessors
//! ship with the crate: one for the owned [`SequenceRecord`] and one for
//! `seq_io`'s owned FASTQ records.

use seq_io::fastq::{OwnedRecord, Record};

/// Read-only view of a record's sequence, qualities and name.
///
/// Implementations are stateless adapters; `&self` exists so an accessor can carry
/// configuration if it needs to.
pub trait RecordAccessor {
    /// The record type this accessor reads.
    type Record;

    /// Bases of the record.
    fn sequence<'r>(&self, record: &'r Self::Record) -> &'r [u8];

    /// Phred-encoded qualities, or `None` for sequence-only (FASTA-like) records.
    fn qualities<'r>(&self, record: &'r Self::Record) -> Option<&'r [u8]>;

    /// Record name, used in error messages.
    fn name<'r>(&self, _record: &'r Self::Record) -> Option<&'r [u8]> {
        None
    }
}

/// An owned sequencing record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequenceRecord {
    /// Full header line without the leading `@`
    pub name: Vec<u8>,
    /// Bases
    pub sequence: Vec<u8>,
    /// Phred-encoded qualities; `None` for sequence-only records
    pub qualities: Option<Vec<u8>>,
}

impl SequenceRecord {
    /// Creates a record with qualities.
    pub fn new(
        name: impl Into<Vec<u8>>,
        sequence: impl Into<Vec<u8>>,
        qualities: impl Into<Vec<u8>>,
    ) -> Self {
        Self { name: name.into(), sequence: sequence.into(), qualities: Some(qualities.into()) }
    }

    /// Creates a record without qualities.
    pub fn without_qualities(name: impl Into<Vec<u8>>, sequence: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), sequence: sequence.into(), qualities: None }
    }

    /// Number of bases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// True if the record has no bases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl From<OwnedRecord> for SequenceRecord {
    fn from(record: OwnedRecord) -> Self {
        Self { name: record.head, sequence: record.seq, qualities: Some(record.qual) }
    }
}

/// Accessor for [`SequenceRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRecordAccessor;

impl RecordAccessor for SequenceRecordAccessor {
    type Record = SequenceRecord;

    fn sequence<'r>(&self, record: &'r SequenceRecord) -> &'r [u8] {
        &record.sequence
    }

    fn qualities<'r>(&self, record: &'r SequenceRecord) -> Option<&'r [u8]> {
        record.qualities.as_deref()
    }

    fn name<'r>(&self, record: &'r SequenceRecord) -> Option<&'r [u8]> {
        Some(&record.name)
    }
}

/// Accessor for `seq_io` owned FASTQ records. FASTQ always carries qualities.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastqRecordAccessor;

impl RecordAccessor for FastqRecordAccessor {
    type Record = OwnedRecord;

    fn sequence<'r>(&self, record: &'r OwnedRecord) -> &'r [u8] {
        record.seq()
    }

    fn qualities<'r>(&self, record: &'r OwnedRecord) -> Option<&'r [u8]> {
        Some(record.qual())
    }

    fn name<'r>(&self, record: &'r OwnedRecord) -> Option<&'r [u8]> {
        Some(record.head())
    }
}

/// Returns the identifier used to decide whether two records are mates.
///
/// The identifier is the header up to the first whitespace with a trailing read
/// number suffix (`/1`, `.2`, `_1`, `:2`) removed.
#[must_use]
pub fn mate_id(name: &[u8]) -> &[u8] {
    let name = name.strip_prefix(b"@").unwrap_or(name);
    let name = match name.iter().position(u8::is_ascii_whitespace) {
        Some(pos) => &name[..pos],
        None => name,
    };
    match name {
        [rest @ .., b'/' | b'.' | b'_' | b':', b'1' | b'2'] => rest,
        _ => name,
    }
}

/// True if all names share a [`mate_id`].
#[must_use]
pub fn names_are_mates<'a>(mut names: impl Iterator<Item = &'a [u8]>) -> bool {
    let Some(first) = names.next().map(mate_id) else {
        return true;
    };
    names.all(|name| mate_id(name) == first)
}
