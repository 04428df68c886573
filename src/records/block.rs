//! Block-level chunk reader
//!
//! Walks the 32768-byte block structure of a shard file and yields one
//! verified chunk at a time. The reader distinguishes three outcomes so
//! the caller can apply the truncation policy:
//! - a chunk whose checksum verified,
//! - clean end of file (no bytes, or only padding, remained),
//! - truncation (the stream ended inside a header or payload).
//!
//! Checksum mismatches and layout violations are errors; whether a
//! truncation is fatal depends on record-assembly state, which this
//! layer does not know.

use std::io::{self, Read};

use super::checksum;
use super::chunk::{Chunk, ChunkType, BLOCK_SIZE, HEADER_SIZE, PADDING_TYPE};
use super::errors::{RecordError, RecordResult};

/// Outcome of one `next_chunk` call.
#[derive(Debug)]
pub enum ChunkRead {
    /// A verified chunk
    Chunk(Chunk),
    /// The stream ended at a chunk boundary (possibly after padding)
    EndOfFile,
    /// The stream ended inside a chunk header or payload
    Truncated {
        /// Byte offset of the incomplete chunk's header
        offset: u64,
    },
}

/// Sequential chunk reader over the block layout.
#[derive(Debug)]
pub struct BlockReader<R> {
    /// Underlying byte stream
    reader: R,
    /// Byte offset of the next unread position
    offset: u64,
}

impl<R: Read> BlockReader<R> {
    /// Creates a reader positioned at the start of the stream.
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// Returns the byte offset of the next unread position.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads the next chunk.
    ///
    /// Skips block padding transparently. Returns an error on checksum
    /// mismatch, on a type byte outside the known set, or when a chunk's
    /// declared length would cross its block boundary.
    pub fn next_chunk(&mut self) -> RecordResult<ChunkRead> {
        loop {
            let within_block = (self.offset % BLOCK_SIZE as u64) as usize;
            let left_in_block = BLOCK_SIZE - within_block;

            // Too small for another header: the rest of the block is padding.
            if left_in_block < HEADER_SIZE {
                if !self.skip(left_in_block)? {
                    return Ok(ChunkRead::EndOfFile);
                }
                continue;
            }

            let header_offset = self.offset;
            let mut header = [0u8; HEADER_SIZE];
            let got = self.read_into(&mut header)?;
            if got == 0 {
                return Ok(ChunkRead::EndOfFile);
            }
            if got < HEADER_SIZE {
                return Ok(ChunkRead::Truncated {
                    offset: header_offset,
                });
            }

            let stored_checksum = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
            let length = u16::from_le_bytes([header[4], header[5]]) as usize;
            let type_byte = header[6];

            // Writer zero-fill: the rest of this block carries no chunks.
            if type_byte == PADDING_TYPE {
                let rest = (BLOCK_SIZE as u64 - self.offset % BLOCK_SIZE as u64)
                    as usize
                    % BLOCK_SIZE;
                if !self.skip(rest)? {
                    return Ok(ChunkRead::EndOfFile);
                }
                continue;
            }

            let chunk_type = ChunkType::from_u8(type_byte).ok_or_else(|| {
                RecordError::framing_at_offset(
                    header_offset,
                    format!("Invalid chunk type byte: {}", type_byte),
                )
            })?;

            if length > left_in_block - HEADER_SIZE {
                return Err(RecordError::framing_at_offset(
                    header_offset,
                    format!(
                        "Chunk length {} overruns block boundary ({} bytes left in block)",
                        length,
                        left_in_block - HEADER_SIZE
                    ),
                ));
            }

            let mut payload = vec![0u8; length];
            let got = self.read_into(&mut payload)?;
            if got < length {
                return Ok(ChunkRead::Truncated {
                    offset: header_offset,
                });
            }

            if !checksum::verify(stored_checksum, type_byte, &payload) {
                return Err(RecordError::corruption_at_offset(
                    header_offset,
                    format!(
                        "Checksum mismatch: stored {:08x}, computed {:08x}",
                        stored_checksum,
                        checksum::chunk_checksum(type_byte, &payload)
                    ),
                ));
            }

            return Ok(ChunkRead::Chunk(Chunk {
                chunk_type,
                payload,
            }));
        }
    }

    /// Reads as many bytes as possible into `buf`, returning the count.
    ///
    /// A short count means the stream ended.
    fn read_into(&mut self, buf: &mut [u8]) -> RecordResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(RecordError::io(
                        format!("Read failed at byte offset {}", self.offset + filled as u64),
                        e,
                    ))
                }
            }
        }
        self.offset += filled as u64;
        Ok(filled)
    }

    /// Discards `count` bytes. Returns false if the stream ended first.
    fn skip(&mut self, count: usize) -> RecordResult<bool> {
        let mut remaining = count;
        let mut scratch = [0u8; 512];
        while remaining > 0 {
            let want = remaining.min(scratch.len());
            let got = self.read_into(&mut scratch[..want])?;
            if got == 0 {
                return Ok(false);
            }
            remaining -= got;
        }
        Ok(true)
    }
}
