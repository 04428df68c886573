//! Entity decoding
//!
//! `EntityDecoder` is the seam between the record log and the document
//! pipeline: one logical record in, one decoded entity out. The shipped
//! `BinaryEntityDecoder` reads a length-prefixed little-endian tagged
//! encoding:
//!
//! - key path: element count (u32 LE), then per element a length-prefixed
//!   kind string and a tagged id (0 = i64 LE, 1 = length-prefixed name)
//! - properties: count (u32 LE), then per property a length-prefixed name
//!   and a tagged value
//!
//! Value tags: 0 null, 1 boolean, 2 integer, 3 float, 4 text, 5 blob,
//! 6 timestamp (i64 LE microseconds), 7 geo point (lat f64, lng f64),
//! 8 reference (nested key path), 9 embedded entity (nested property
//! map), 10 list. An unrecognized tag is a decode failure; it is never
//! skipped or coerced to text.

use chrono::DateTime;

use super::errors::{EntityError, EntityResult};
use super::key::{ElementId, Key, PathElement};
use super::value::{DecodedEntity, TypedValue};

/// Value tag bytes of the binary entity encoding.
pub mod tag {
    pub const NULL: u8 = 0;
    pub const BOOLEAN: u8 = 1;
    pub const INTEGER: u8 = 2;
    pub const FLOAT: u8 = 3;
    pub const TEXT: u8 = 4;
    pub const BLOB: u8 = 5;
    pub const TIMESTAMP: u8 = 6;
    pub const GEO_POINT: u8 = 7;
    pub const REFERENCE: u8 = 8;
    pub const ENTITY: u8 = 9;
    pub const LIST: u8 = 10;
}

/// Id tag bytes of the binary entity encoding.
pub mod id_tag {
    pub const NUMERIC: u8 = 0;
    pub const NAME: u8 = 1;
}

/// Decodes one logical record's bytes into an entity.
///
/// The conversion pipeline is generic over this trait; a decode failure
/// aborts the shard being converted.
pub trait EntityDecoder {
    /// Decodes a logical record.
    fn decode(&self, record: &[u8]) -> EntityResult<DecodedEntity>;
}

/// Decoder for the binary entity encoding described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryEntityDecoder;

impl BinaryEntityDecoder {
    /// Creates a decoder.
    pub fn new() -> Self {
        Self
    }
}

impl EntityDecoder for BinaryEntityDecoder {
    fn decode(&self, record: &[u8]) -> EntityResult<DecodedEntity> {
        let mut reader = ByteReader::new(record);
        let key = read_key(&mut reader)?;
        let properties = read_properties(&mut reader)?;
        if reader.remaining() > 0 {
            return Err(EntityError::TrailingBytes(reader.remaining()));
        }
        Ok(DecodedEntity { key, properties })
    }
}

fn read_key(reader: &mut ByteReader<'_>) -> EntityResult<Key> {
    let count = reader.read_u32("key path element count")? as usize;
    let mut path = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let kind = reader.read_string("key element kind")?;
        let id = match reader.read_u8("key id tag")? {
            id_tag::NUMERIC => ElementId::Id(reader.read_i64("numeric key id")?),
            id_tag::NAME => ElementId::Name(reader.read_string("key id name")?),
            other => return Err(EntityError::UnknownIdTag(other)),
        };
        path.push(PathElement { kind, id });
    }
    Ok(Key::new(path))
}

fn read_properties(reader: &mut ByteReader<'_>) -> EntityResult<Vec<(String, TypedValue)>> {
    let count = reader.read_u32("property count")? as usize;
    let mut properties = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let name = reader.read_string("property name")?;
        let value = read_value(reader)?;
        properties.push((name, value));
    }
    Ok(properties)
}

fn read_value(reader: &mut ByteReader<'_>) -> EntityResult<TypedValue> {
    let value = match reader.read_u8("value tag")? {
        tag::NULL => TypedValue::Null,
        tag::BOOLEAN => TypedValue::Boolean(reader.read_u8("boolean value")? != 0),
        tag::INTEGER => TypedValue::Integer(reader.read_i64("integer value")?),
        tag::FLOAT => TypedValue::Float(reader.read_f64("float value")?),
        tag::TEXT => TypedValue::Text(reader.read_string("text value")?),
        tag::BLOB => TypedValue::Blob(reader.read_bytes("blob value")?),
        tag::TIMESTAMP => {
            let micros = reader.read_i64("timestamp value")?;
            let instant = DateTime::from_timestamp_micros(micros)
                .ok_or(EntityError::TimestampOutOfRange(micros))?;
            TypedValue::Timestamp(instant)
        }
        tag::GEO_POINT => TypedValue::GeoPoint {
            lat: reader.read_f64("geo point latitude")?,
            lng: reader.read_f64("geo point longitude")?,
        },
        tag::REFERENCE => TypedValue::Reference(read_key(reader)?),
        tag::ENTITY => TypedValue::Entity(read_properties(reader)?),
        tag::LIST => {
            let count = reader.read_u32("list length")? as usize;
            let mut items = Vec::with_capacity(count.min(64));
            for _ in 0..count {
                items.push(read_value(reader)?);
            }
            TypedValue::List(items)
        }
        other => return Err(EntityError::UnknownValueTag(other)),
    };
    Ok(value)
}

/// Bounds-checked reader over a record's bytes.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize, context: &'static str) -> EntityResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(EntityError::UnexpectedEnd(context));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self, context: &'static str) -> EntityResult<u8> {
        Ok(self.take(1, context)?[0])
    }

    fn read_u32(&mut self, context: &'static str) -> EntityResult<u32> {
        let bytes = self.take(4, context)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_i64(&mut self, context: &'static str) -> EntityResult<i64> {
        let bytes = self.take(8, context)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(i64::from_le_bytes(buf))
    }

    fn read_f64(&mut self, context: &'static str) -> EntityResult<f64> {
        let bytes = self.take(8, context)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(buf))
    }

    fn read_bytes(&mut self, context: &'static str) -> EntityResult<Vec<u8>> {
        let len = self.read_u32(context)? as usize;
        Ok(self.take(len, context)?.to_vec())
    }

    fn read_string(&mut self, context: &'static str) -> EntityResult<String> {
        let bytes = self.read_bytes(context)?;
        String::from_utf8(bytes).map_err(|_| EntityError::InvalidUtf8(context))
    }
}
