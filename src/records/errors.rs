//! Record-log error types
//!
//! Error codes:
//! - FSJ_LOG_CORRUPTION (checksum mismatch, mid-record truncation)
//! - FSJ_LOG_FRAMING (chunk-type ordering or layout violations)
//! - FSJ_LOG_IO (underlying read failures)
//!
//! Every record-log error is fatal for the shard being read: the reader
//! never skips over damage, since a silently dropped chunk would merge
//! partial records into the wrong documents downstream.

use std::fmt;
use std::io;

/// Record-log error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorCode {
    /// Checksum mismatch or truncation inside a record
    FsjLogCorruption,
    /// Chunk-type sequence or block-layout violation
    FsjLogFraming,
    /// Underlying I/O failure
    FsjLogIo,
}

impl RecordErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RecordErrorCode::FsjLogCorruption => "FSJ_LOG_CORRUPTION",
            RecordErrorCode::FsjLogFraming => "FSJ_LOG_FRAMING",
            RecordErrorCode::FsjLogIo => "FSJ_LOG_IO",
        }
    }
}

impl fmt::Display for RecordErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Record-log error with position context
#[derive(Debug)]
pub struct RecordError {
    /// Error code
    code: RecordErrorCode,
    /// Human-readable message
    message: String,
    /// Optional context about where in the file the error occurred
    details: Option<String>,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl RecordError {
    /// Create a corruption error
    pub fn corruption(message: impl Into<String>) -> Self {
        Self {
            code: RecordErrorCode::FsjLogCorruption,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Create a corruption error with byte offset context
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            code: RecordErrorCode::FsjLogCorruption,
            message: reason.into(),
            details: Some(format!("byte_offset: {}", offset)),
            source: None,
        }
    }

    /// Create a framing error with byte offset context
    pub fn framing_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            code: RecordErrorCode::FsjLogFraming,
            message: reason.into(),
            details: Some(format!("byte_offset: {}", offset)),
            source: None,
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: RecordErrorCode::FsjLogIo,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RecordErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for record-log operations
pub type RecordResult<T> = Result<T, RecordError>;
