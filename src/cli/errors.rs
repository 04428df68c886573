//! CLI error types

use thiserror::Error;

use crate::convert::ConvertError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Source directory does not exist: {0}")]
    SourceMissing(String),

    #[error("Failed to prepare destination directory {path}: {message}")]
    DestDir { path: String, message: String },

    #[error("{failed} of {attempted} shards failed to convert")]
    ShardFailures { failed: usize, attempted: usize },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
