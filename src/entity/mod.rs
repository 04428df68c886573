//! Decoded entities
//!
//! Types for one decoded entity (ancestor key path + typed property
//! map), the `EntityDecoder` seam the conversion pipeline consumes, and
//! the shipped binary codec implementation.

mod decoder;
mod errors;
mod key;
mod value;

pub use decoder::{id_tag, tag, BinaryEntityDecoder, EntityDecoder};
pub use errors::{EntityError, EntityResult};
pub use key::{ElementId, Key, PathElement};
pub use value::{DecodedEntity, TypedValue};
