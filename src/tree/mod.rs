//! In-memory document tree
//!
//! The tree is an ordered JSON object keyed by `"{kind}:{id}"` segment
//! strings. A node may hold its own properties and child segments at the
//! same time; descending never removes anything, and later entities with
//! the same key path overwrite earlier values property by property.
//!
//! One tree is built per shard, handed to the JSON writer, and dropped.

mod errors;

pub use errors::{TreeError, TreeResult};

use serde_json::{Map, Value};

use crate::entity::Key;

/// A shard's document tree. Key order is insertion order of first
/// appearance, which carries through to the JSON output.
pub type DocumentTree = Map<String, Value>;

/// Merges one normalized entity into the tree.
///
/// Walks the ancestor path, creating nested nodes as needed, then
/// merge-overwrites the entity's properties into the leaf node: a later
/// value wins per property name, properties under other names survive.
///
/// # Errors
///
/// - `EmptyKeyPath` if the entity has no path elements
/// - `SegmentCollision` if a path segment lands on an existing value
///   that is not a document node
pub fn merge(
    tree: &mut DocumentTree,
    key: &Key,
    properties: Map<String, Value>,
) -> TreeResult<()> {
    if key.is_empty() {
        return Err(TreeError::EmptyKeyPath);
    }

    let mut node = tree;
    for element in &key.path {
        let segment = element.segment();
        let slot = node
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match slot.as_object_mut() {
            Some(child) => child,
            None => return Err(TreeError::SegmentCollision(segment)),
        };
    }

    for (name, value) in properties {
        node.insert(name, value);
    }
    Ok(())
}
