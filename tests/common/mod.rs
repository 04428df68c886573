//! Shared test support
//!
//! Builds shard files in the block/chunk layout the reader consumes,
//! and encodes entities in the binary entity encoding the shipped
//! decoder reads. Lives only in tests: the tool itself never writes
//! the export-log format.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use fs2json::entity::{id_tag, tag, ElementId, Key, PathElement, TypedValue};
use fs2json::records::{chunk_checksum, ChunkType, BLOCK_SIZE, HEADER_SIZE};

/// Builds shard files chunk by chunk.
pub struct LogBuilder {
    bytes: Vec<u8>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    fn left_in_block(&self) -> usize {
        BLOCK_SIZE - self.bytes.len() % BLOCK_SIZE
    }

    /// Appends one chunk with a valid checksum.
    ///
    /// Panics if the chunk does not fit in the current block; use
    /// `record` for automatic splitting.
    pub fn chunk(&mut self, chunk_type: ChunkType, payload: &[u8]) -> &mut Self {
        assert!(
            HEADER_SIZE + payload.len() <= self.left_in_block(),
            "chunk of {} bytes does not fit in current block",
            payload.len()
        );
        let type_byte = chunk_type.as_u8();
        self.bytes
            .extend_from_slice(&chunk_checksum(type_byte, payload).to_le_bytes());
        self.bytes
            .extend_from_slice(&(payload.len() as u16).to_le_bytes());
        self.bytes.push(type_byte);
        self.bytes.extend_from_slice(payload);
        self
    }

    /// Appends one logical record, splitting it across blocks the way a
    /// real log writer does.
    pub fn record(&mut self, payload: &[u8]) -> &mut Self {
        let mut rest = payload;
        let mut first = true;
        loop {
            if self.left_in_block() < HEADER_SIZE {
                self.pad_block();
            }
            let room = self.left_in_block() - HEADER_SIZE;
            if first && rest.len() <= room {
                return self.chunk(ChunkType::Full, rest);
            }
            let take = rest.len().min(room);
            let chunk_type = if first {
                ChunkType::First
            } else if rest.len() <= room {
                ChunkType::Last
            } else {
                ChunkType::Middle
            };
            self.chunk(chunk_type, &rest[..take]);
            if chunk_type == ChunkType::Last {
                return self;
            }
            rest = &rest[take..];
            first = false;
        }
    }

    /// Zero-fills to the next block boundary.
    pub fn pad_block(&mut self) -> &mut Self {
        let pad = self.bytes.len() % BLOCK_SIZE;
        if pad != 0 {
            self.bytes.resize(self.bytes.len() + BLOCK_SIZE - pad, 0);
        }
        self
    }

    /// Returns the accumulated bytes.
    pub fn build(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Writes the accumulated bytes as a shard file.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, &self.bytes).unwrap();
        path
    }
}

/// Encodes an entity in the binary entity encoding.
pub fn encode_entity(key: &Key, properties: &[(String, TypedValue)]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_key(&mut buf, key);
    encode_properties(&mut buf, properties);
    buf
}

/// Convenience: entity with string-named path segments.
pub fn entity_record(segments: &[(&str, &str)], properties: &[(&str, TypedValue)]) -> Vec<u8> {
    let key = Key::new(
        segments
            .iter()
            .map(|(kind, name)| PathElement::named(*kind, *name))
            .collect(),
    );
    let properties: Vec<(String, TypedValue)> = properties
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();
    encode_entity(&key, &properties)
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn encode_key(buf: &mut Vec<u8>, key: &Key) {
    buf.extend_from_slice(&(key.path.len() as u32).to_le_bytes());
    for element in &key.path {
        push_str(buf, &element.kind);
        match &element.id {
            ElementId::Id(id) => {
                buf.push(id_tag::NUMERIC);
                buf.extend_from_slice(&id.to_le_bytes());
            }
            ElementId::Name(name) => {
                buf.push(id_tag::NAME);
                push_str(buf, name);
            }
        }
    }
}

fn encode_properties(buf: &mut Vec<u8>, properties: &[(String, TypedValue)]) {
    buf.extend_from_slice(&(properties.len() as u32).to_le_bytes());
    for (name, value) in properties {
        push_str(buf, name);
        encode_value(buf, value);
    }
}

fn encode_value(buf: &mut Vec<u8>, value: &TypedValue) {
    match value {
        TypedValue::Null => buf.push(tag::NULL),
        TypedValue::Boolean(b) => {
            buf.push(tag::BOOLEAN);
            buf.push(u8::from(*b));
        }
        TypedValue::Integer(n) => {
            buf.push(tag::INTEGER);
            buf.extend_from_slice(&n.to_le_bytes());
        }
        TypedValue::Float(f) => {
            buf.push(tag::FLOAT);
            buf.extend_from_slice(&f.to_le_bytes());
        }
        TypedValue::Text(s) => {
            buf.push(tag::TEXT);
            push_str(buf, s);
        }
        TypedValue::Blob(bytes) => {
            buf.push(tag::BLOB);
            buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            buf.extend_from_slice(bytes);
        }
        TypedValue::Timestamp(instant) => {
            buf.push(tag::TIMESTAMP);
            buf.extend_from_slice(&instant.timestamp_micros().to_le_bytes());
        }
        TypedValue::GeoPoint { lat, lng } => {
            buf.push(tag::GEO_POINT);
            buf.extend_from_slice(&lat.to_le_bytes());
            buf.extend_from_slice(&lng.to_le_bytes());
        }
        TypedValue::Reference(key) => {
            buf.push(tag::REFERENCE);
            encode_key(buf, key);
        }
        TypedValue::Entity(properties) => {
            buf.push(tag::ENTITY);
            encode_properties(buf, properties);
        }
        TypedValue::List(items) => {
            buf.push(tag::LIST);
            buf.extend_from_slice(&(items.len() as u32).to_le_bytes());
            for item in items {
                encode_value(buf, item);
            }
        }
    }
}
