//! Document tree error types

use thiserror::Error;

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Structural errors while merging an entity into the document tree
///
/// Both variants are fatal for the shard being converted.
#[derive(Debug, Clone, Error)]
pub enum TreeError {
    #[error("Entity key path is empty")]
    EmptyKeyPath,

    #[error("Key segment {0:?} collides with a non-document value")]
    SegmentCollision(String),
}
