//! Validation of command-line parameters and input paths.
//!
//! Failures are reported as [`FilterError`] values naming the offending parameter.

use std::fmt::Display;
use std::path::Path;

use crate::errors::{FilterError, Result};
use crate::fastq::is_stdio;

/// Checks that an input file exists. The stdin placeholder `-` always passes.
///
/// # Errors
/// Returns [`FilterError::InvalidFileFormat`] if the file does not exist.
///
/// # Example
/// ```
/// use fastq_filter_lib::validation::validate_input_exists;
///
/// assert!(validate_input_exists("-", "FASTQ").is_ok());
/// assert!(validate_input_exists("/nonexistent/reads.fq", "FASTQ").is_err());
/// ```
pub fn validate_input_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path = path.as_ref();
    if !is_stdio(path) && !path.exists() {
        return Err(FilterError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Checks that two lists pair up one-to-one.
///
/// # Errors
/// Returns [`FilterError::InvalidParameter`] naming `right_name` if the lengths differ.
pub fn validate_same_count(
    left: usize,
    right: usize,
    left_name: &str,
    right_name: &str,
) -> Result<()> {
    if left != right {
        return Err(FilterError::InvalidParameter {
            parameter: right_name.to_string(),
            reason: format!(
                "Number of {left_name} ({left}) and {right_name} ({right}) should be equal"
            ),
        });
    }
    Ok(())
}

/// Checks that an optional maximum is not below an optional minimum.
///
/// # Errors
/// Returns [`FilterError::InvalidParameter`] if `max < min`.
///
/// # Example
/// ```
/// use fastq_filter_lib::validation::validate_min_max;
///
/// assert!(validate_min_max(Some(50), Some(150), "min-length", "max-length").is_ok());
/// assert!(validate_min_max(Some(50), None, "min-length", "max-length").is_ok());
/// assert!(validate_min_max(Some(150), Some(50), "min-length", "max-length").is_err());
/// ```
pub fn validate_min_max<T: PartialOrd + Display>(
    min_val: Option<T>,
    max_val: Option<T>,
    min_name: &str,
    max_name: &str,
) -> Result<()> {
    if let (Some(min), Some(max)) = (min_val, max_val) {
        if max < min {
            return Err(FilterError::InvalidParameter {
                parameter: max_name.to_string(),
                reason: format!("{max_name} ({max}) must be >= {min_name} ({min})"),
            });
        }
    }
    Ok(())
}

/// Checks that an error rate lies in `[0, 1]`.
///
/// # Errors
/// Returns [`FilterError::InvalidParameter`] for values outside the range or NaN.
pub fn validate_error_rate(rate: f64, name: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(FilterError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("must be between 0 and 1, got {rate}"),
        });
    }
    Ok(())
}

/// Checks that a gzip compression level lies in `[0, 9]`.
///
/// # Errors
/// Returns [`FilterError::InvalidParameter`] for levels above 9.
pub fn validate_compression_level(level: u32) -> Result<()> {
    if level > 9 {
        return Err(FilterError::InvalidParameter {
            parameter: "compression-level".to_string(),
            reason: format!("must be between 0 and 9, got {level}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_input_exists() {
        let temp_file = NamedTempFile::new().unwrap();
        validate_input_exists(temp_file.path(), "FASTQ").unwrap();
        validate_input_exists("-", "FASTQ").unwrap();

        let err = validate_input_exists("/nonexistent/reads.fq", "FASTQ").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid FASTQ file '/nonexistent/reads.fq'"), "{msg}");
        assert!(msg.contains("File does not exist"), "{msg}");
    }

    #[test]
    fn test_validate_same_count() {
        validate_same_count(2, 2, "inputs", "outputs").unwrap();
        let err = validate_same_count(2, 1, "inputs", "outputs").unwrap_err();
        assert!(err.to_string().contains("Number of inputs (2) and outputs (1) should be equal"));
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(Some(10), None, true)]
    #[case(None, Some(10), true)]
    #[case(Some(10), Some(10), true)]
    #[case(Some(10), Some(20), true)]
    #[case(Some(20), Some(10), false)]
    fn test_validate_min_max(
        #[case] min: Option<usize>,
        #[case] max: Option<usize>,
        #[case] ok: bool,
    ) {
        assert_eq!(validate_min_max(min, max, "min-length", "max-length").is_ok(), ok);
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(0.001, true)]
    #[case(1.0, true)]
    #[case(-0.1, false)]
    #[case(1.5, false)]
    #[case(f64::NAN, false)]
    fn test_validate_error_rate(#[case] rate: f64, #[case] ok: bool) {
        assert_eq!(validate_error_rate(rate, "average-error-rate").is_ok(), ok);
    }

    #[test]
    fn test_validate_compression_level() {
        assert!(validate_compression_level(0).is_ok());
        assert!(validate_compression_level(9).is_ok());
        assert!(matches!(
            validate_compression_level(10),
            Err(FilterError::InvalidParameter { parameter, .. }) if parameter == "compression-level"
        ));
    }
}
