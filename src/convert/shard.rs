//! Per-shard conversion
//!
//! One shard in, one document tree out. Records are processed strictly
//! in file order; the shard's file handle is held only for the duration
//! of the read and released on every path.

use std::path::Path;

use serde::Serialize;

use crate::entity::EntityDecoder;
use crate::normalize::normalize_properties;
use crate::records::RecordAssembler;
use crate::tree::{self, DocumentTree};

use super::errors::{ConvertError, ConvertResult};

/// Counters for one converted shard.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ShardStats {
    /// Logical records read (one decoded entity each)
    pub documents: u64,
}

/// Converts one shard file into a document tree.
///
/// Decode failures and structural errors are reported with the
/// zero-based index of the offending record; log-level errors carry
/// their byte offset.
pub fn convert_shard<D: EntityDecoder>(
    path: &Path,
    decoder: &D,
) -> ConvertResult<(DocumentTree, ShardStats)> {
    let mut records = RecordAssembler::open(path)?;
    let mut doc_tree = DocumentTree::new();
    let mut index = 0u64;

    while let Some(record) = records.next_record()? {
        let entity = decoder
            .decode(&record)
            .map_err(|source| ConvertError::Decode { index, source })?;
        let properties = normalize_properties(&entity.properties);
        tree::merge(&mut doc_tree, &entity.key, properties)
            .map_err(|source| ConvertError::Structure { index, source })?;
        index += 1;
    }

    Ok((doc_tree, ShardStats { documents: index }))
}
