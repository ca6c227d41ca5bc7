//! Custom error types for fastq-filter operations.

use thiserror::Error;

/// Result type alias for fastq-filter operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Error type for fastq-filter operations
#[derive(Error, Debug)]
pub enum FilterError {
    /// A sequence or quality string contained bytes outside the ASCII range
    #[error("{field} must contain only ASCII characters")]
    NonAscii {
        /// Which input was rejected (e.g. "phred_scores", "sequence")
        field: &'static str,
    },

    /// A quality byte decoded to a Phred score outside the valid range
    #[error(
        "Character {} outside of valid phred range ({} to {}, ASCII {offset} to {max})",
        display_byte(.character),
        display_byte(.offset),
        display_byte(.max)
    )]
    PhredOutOfRange {
        /// The offending quality byte
        character: u8,
        /// The configured Phred offset, i.e. the lowest valid byte
        offset: u8,
        /// The highest valid byte
        max: u8,
    },

    /// A quality-based filter was given a record without quality scores
    #[error("Record '{record}' has no quality scores; quality filters require FASTQ input")]
    MissingQualities {
        /// Name of the offending record
        record: String,
    },

    /// The histogram median walk ran off the end of the histogram
    #[error(
        "Unable to find the median of {total} quality scores; histogram counts do not add up. \
         This is a bug, please report it."
    )]
    MedianNotFound {
        /// The total count the walk was looking for
        total: u64,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format or file pairing error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g. "FASTQ")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}

/// Renders a byte for error messages, quoting printable characters and
/// escaping the rest.
fn display_byte(byte: &u8) -> String {
    let byte = *byte;
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("'\\x{byte:02x}'")
    }
}
