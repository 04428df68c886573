//! Entity decoding error types

use thiserror::Error;

/// Result type for entity decoding
pub type EntityResult<T> = Result<T, EntityError>;

/// Entity decoding errors
///
/// Every variant is fatal for the shard being converted: a record that
/// fails to decode may carry a damaged key path, and skipping it would
/// misplace later entities in the document tree.
#[derive(Debug, Clone, Error)]
pub enum EntityError {
    #[error("Entity record ended early while reading {0}")]
    UnexpectedEnd(&'static str),

    #[error("Invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    #[error("Unknown value tag: {0}")]
    UnknownValueTag(u8),

    #[error("Unknown key id tag: {0}")]
    UnknownIdTag(u8),

    #[error("Timestamp out of range: {0} microseconds since epoch")]
    TimestampOutOfRange(i64),

    #[error("{0} trailing bytes after entity")]
    TrailingBytes(usize),
}
