//! Logical record assembly
//!
//! Reassembles logical records from the chunk stream:
//! - FULL yields its payload directly,
//! - FIRST starts an accumulation buffer, MIDDLE chunks extend it, and
//!   LAST completes it.
//!
//! Any other ordering is a framing error and aborts the shard. There is
//! no skip-and-resync: a partially assembled record merged downstream
//! would silently corrupt the document tree.
//!
//! Truncation policy: a stream that ends inside a chunk is a clean end
//! of file when no record is in progress (the writer stopped at a record
//! boundary), and corruption when one is.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::block::{BlockReader, ChunkRead};
use super::chunk::ChunkType;
use super::errors::{RecordError, RecordResult};

/// Reassembles logical records from a chunk stream.
///
/// Records are produced lazily and strictly in file order. Restarting
/// requires recreating the assembler from the start of the stream.
#[derive(Debug)]
pub struct RecordAssembler<R> {
    /// Chunk source
    blocks: BlockReader<R>,
    /// Accumulation buffer for a record spanning multiple chunks
    buffer: Vec<u8>,
    /// Whether a FIRST chunk has opened a record that is not yet closed
    in_record: bool,
    /// Byte offset where the in-progress record started
    record_start: u64,
}

impl RecordAssembler<BufReader<File>> {
    /// Opens a shard file for record reading.
    pub fn open(path: &Path) -> RecordResult<Self> {
        let file = File::open(path).map_err(|e| {
            RecordError::io(format!("Failed to open shard file: {}", path.display()), e)
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordAssembler<R> {
    /// Creates an assembler over a byte stream.
    pub fn new(reader: R) -> Self {
        Self {
            blocks: BlockReader::new(reader),
            buffer: Vec::new(),
            in_record: false,
            record_start: 0,
        }
    }

    /// Returns the byte offset of the next unread position.
    pub fn offset(&self) -> u64 {
        self.blocks.offset()
    }

    /// Reads the next logical record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` for the next complete record
    /// - `Ok(None)` at clean end of file
    /// - `Err(RecordError)` on corruption or framing violations
    pub fn next_record(&mut self) -> RecordResult<Option<Vec<u8>>> {
        loop {
            let chunk_offset = self.blocks.offset();
            match self.blocks.next_chunk()? {
                ChunkRead::EndOfFile => {
                    if self.in_record {
                        return Err(RecordError::corruption_at_offset(
                            self.record_start,
                            "File ended inside a record spanning multiple chunks",
                        ));
                    }
                    return Ok(None);
                }
                ChunkRead::Truncated { offset } => {
                    if self.in_record {
                        return Err(RecordError::corruption_at_offset(
                            offset,
                            "Truncated chunk inside a record spanning multiple chunks",
                        ));
                    }
                    // The writer was cut off after a complete record; treat
                    // the partial tail as a clean end of file.
                    return Ok(None);
                }
                ChunkRead::Chunk(chunk) => match chunk.chunk_type {
                    ChunkType::Full => {
                        if self.in_record {
                            return Err(RecordError::framing_at_offset(
                                chunk_offset,
                                "FULL chunk while a spanning record is in progress",
                            ));
                        }
                        return Ok(Some(chunk.payload));
                    }
                    ChunkType::First => {
                        if self.in_record {
                            return Err(RecordError::framing_at_offset(
                                chunk_offset,
                                "FIRST chunk while a spanning record is in progress",
                            ));
                        }
                        self.record_start = chunk_offset;
                        self.buffer = chunk.payload;
                        self.in_record = true;
                    }
                    ChunkType::Middle => {
                        if !self.in_record {
                            return Err(RecordError::framing_at_offset(
                                chunk_offset,
                                "MIDDLE chunk without a preceding FIRST",
                            ));
                        }
                        self.buffer.extend_from_slice(&chunk.payload);
                    }
                    ChunkType::Last => {
                        if !self.in_record {
                            return Err(RecordError::framing_at_offset(
                                chunk_offset,
                                "LAST chunk without a preceding FIRST",
                            ));
                        }
                        self.buffer.extend_from_slice(&chunk.payload);
                        self.in_record = false;
                        let record = std::mem::take(&mut self.buffer);
                        return Ok(Some(record));
                    }
                },
            }
        }
    }
}

/// Iterator adapter for `RecordAssembler`.
///
/// Stops iteration on any error, which must be treated as fatal for the
/// shard; the error is retained for inspection.
pub struct RecordIterator<R> {
    assembler: RecordAssembler<R>,
    error: Option<RecordError>,
}

impl<R: Read> RecordIterator<R> {
    /// Creates a new iterator from an assembler.
    pub fn new(assembler: RecordAssembler<R>) -> Self {
        Self {
            assembler,
            error: None,
        }
    }

    /// Returns the error if iteration failed.
    pub fn error(&self) -> Option<&RecordError> {
        self.error.as_ref()
    }

    /// Consumes the iterator and returns the error if any.
    pub fn into_error(self) -> Option<RecordError> {
        self.error
    }
}

impl<R: Read> Iterator for RecordIterator<R> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }
        match self.assembler.next_record() {
            Ok(Some(record)) => Some(record),
            Ok(None) => None,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl<R: Read> IntoIterator for RecordAssembler<R> {
    type Item = Vec<u8>;
    type IntoIter = RecordIterator<R>;

    fn into_iter(self) -> Self::IntoIter {
        RecordIterator::new(self)
    }
}
