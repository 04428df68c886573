//! Binary export-log reading
//!
//! The export log is block-structured: 32768-byte blocks holding
//! checksummed chunks, with logical records split across chunks when
//! they cross block boundaries. This module provides:
//! - block: chunk-level reading with checksum verification
//! - assembler: logical-record reassembly with strict framing checks
//! - checksum: the masked CRC-32C scheme the format uses
//!
//! The reader is strict. Damage inside a shard aborts that shard; it is
//! never skipped over.

mod assembler;
mod block;
mod checksum;
mod chunk;
mod errors;

pub use assembler::{RecordAssembler, RecordIterator};
pub use block::{BlockReader, ChunkRead};
pub use checksum::{chunk_checksum, mask, unmask, verify};
pub use chunk::{Chunk, ChunkType, BLOCK_SIZE, HEADER_SIZE, PADDING_TYPE};
pub use errors::{RecordError, RecordErrorCode, RecordResult};
