//! Typed property values
//!
//! The tagged union of every value a decoded entity can carry. The
//! normalizer matches this exhaustively, so adding a variant here is a
//! compile-time error until every consumer handles it.

use chrono::{DateTime, Utc};

use super::key::Key;

/// A property's typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Explicit null
    Null,
    /// Boolean
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Opaque binary blob
    Blob(Vec<u8>),
    /// UTC instant, microsecond precision
    Timestamp(DateTime<Utc>),
    /// Geographic point
    GeoPoint {
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lng: f64,
    },
    /// Reference to another document by its full ancestor path
    Reference(Key),
    /// Embedded entity: an ordered nested property map
    Entity(Vec<(String, TypedValue)>),
    /// Ordered sequence of values
    List(Vec<TypedValue>),
}

/// A fully decoded entity: its key path and its ordered property map.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntity {
    /// Ancestor key path, root to leaf
    pub key: Key,
    /// Properties in decode order; later duplicates win at merge time
    pub properties: Vec<(String, TypedValue)>,
}
