//! Helper utilities for integration tests.

pub mod fastq_generator;

pub use fastq_generator::*;
