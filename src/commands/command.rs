//! Command trait definition for CLI commands.

use anyhow::Result;

/// Trait implemented by fastq-filter CLI commands.
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self) -> Result<()>;
}
