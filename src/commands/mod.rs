//! CLI command implementations for fastq-filter.
//!
//! - [`filter`] - Filter single-end or paired FASTQ files
//! - [`common`] - Option groups shared by commands

#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod filter;
