//! Conversion error types
//!
//! A `ConvertError` is fatal for one shard. The directory run reports
//! it with the shard name and continues with the next shard.

use thiserror::Error;

use crate::entity::EntityError;
use crate::records::RecordError;
use crate::tree::TreeError;

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Shard-fatal conversion errors
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Corruption, framing or I/O failure in the record log
    #[error(transparent)]
    Log(#[from] RecordError),

    /// A logical record that failed to decode
    #[error("Record {index} failed to decode: {source}")]
    Decode {
        /// Zero-based index of the record within the shard
        index: u64,
        source: EntityError,
    },

    /// A decoded entity the tree refused to place
    #[error("Record {index} could not be merged: {source}")]
    Structure {
        /// Zero-based index of the record within the shard
        index: u64,
        source: TreeError,
    },

    /// Directory listing or output writing failure
    #[error("I/O error on {path}: {message}")]
    Io {
        /// Path the operation touched
        path: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_carries_record_index() {
        let err = ConvertError::Decode {
            index: 17,
            source: EntityError::UnknownValueTag(99),
        };
        let display = format!("{}", err);
        assert!(display.contains("Record 17"));
        assert!(display.contains("Unknown value tag: 99"));
    }

    #[test]
    fn test_log_error_keeps_code_and_offset() {
        let err = ConvertError::from(RecordError::corruption_at_offset(98304, "checksum mismatch"));
        let display = format!("{}", err);
        assert!(display.contains("FSJ_LOG_CORRUPTION"));
        assert!(display.contains("byte_offset: 98304"));
    }
}
