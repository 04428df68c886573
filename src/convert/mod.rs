//! Export-to-JSON conversion
//!
//! Drives the full pipeline: discover shard files, read and reassemble
//! their logical records, decode each record into an entity, normalize
//! its property values, merge it into the shard's document tree, and
//! write the tree out as pretty-printed JSON.
//!
//! Shards are independent. A failed shard is reported and skipped; the
//! run continues so healthy shards still produce output.

mod errors;
mod shard;

pub use errors::{ConvertError, ConvertResult};
pub use shard::{convert_shard, ShardStats};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::entity::EntityDecoder;
use crate::observability::{Logger, Severity};

/// Filename prefix that marks a file as an export shard.
const SHARD_PREFIX: &str = "output-";

/// Outcome of a whole-directory run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    /// Shards converted and written
    pub converted: usize,
    /// Shard names that failed, in processing order
    pub failed: Vec<String>,
    /// Total documents across converted shards
    pub documents: u64,
}

impl RunSummary {
    /// Returns the number of shards attempted.
    pub fn attempted(&self) -> usize {
        self.converted + self.failed.len()
    }
}

/// Returns true for file names the converter treats as shards.
pub fn is_shard_name(name: &str) -> bool {
    name.starts_with(SHARD_PREFIX)
}

/// Lists shard files in a source directory, sorted by file name.
pub fn discover_shards(source_dir: &Path) -> ConvertResult<Vec<PathBuf>> {
    let entries = fs::read_dir(source_dir).map_err(|e| ConvertError::Io {
        path: source_dir.display().to_string(),
        message: format!("Failed to list source directory: {}", e),
    })?;

    let mut shards = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConvertError::Io {
            path: source_dir.display().to_string(),
            message: format!("Failed to read directory entry: {}", e),
        })?;
        let path = entry.path();
        let is_file = path.is_file();
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if is_file && is_shard_name(name) {
                shards.push(path);
            }
        }
    }
    shards.sort();
    Ok(shards)
}

/// Converts every shard in `source_dir`, writing one JSON file per
/// converted shard into `dest_dir`.
///
/// Failures are per shard: the offending shard is logged and recorded
/// in the summary, no output file is written for it, and the run moves
/// on. Within a shard, records are processed in file order, so a later
/// duplicate of a document legitimately overwrites earlier property
/// values.
pub fn convert_dir<D: EntityDecoder>(
    source_dir: &Path,
    dest_dir: &Path,
    decoder: &D,
) -> ConvertResult<RunSummary> {
    let shards = discover_shards(source_dir)?;
    let mut summary = RunSummary::default();

    for shard_path in &shards {
        let shard_name = shard_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<non-utf8>")
            .to_string();
        Logger::log(Severity::Info, "shard_started", &[("shard", &shard_name)]);

        match convert_shard(shard_path, decoder) {
            Ok((doc_tree, stats)) => {
                let out_path = dest_dir.join(format!("{}.json", shard_name));
                match write_tree(&out_path, &doc_tree) {
                    Ok(()) => {
                        summary.converted += 1;
                        summary.documents += stats.documents;
                        Logger::log(
                            Severity::Info,
                            "shard_converted",
                            &[
                                ("shard", &shard_name),
                                ("documents", &stats.documents.to_string()),
                                ("output", &out_path.display().to_string()),
                            ],
                        );
                    }
                    Err(e) => {
                        Logger::log_stderr(
                            Severity::Error,
                            "shard_failed",
                            &[("shard", &shard_name), ("error", &e.to_string())],
                        );
                        summary.failed.push(shard_name);
                    }
                }
            }
            Err(e) => {
                Logger::log_stderr(
                    Severity::Error,
                    "shard_failed",
                    &[("shard", &shard_name), ("error", &e.to_string())],
                );
                summary.failed.push(shard_name);
            }
        }
    }

    Ok(summary)
}

/// Writes a document tree as pretty-printed UTF-8 JSON.
fn write_tree(path: &Path, doc_tree: &crate::tree::DocumentTree) -> ConvertResult<()> {
    let json = serde_json::to_string_pretty(doc_tree).map_err(|e| ConvertError::Io {
        path: path.display().to_string(),
        message: format!("Failed to serialize tree: {}", e),
    })?;
    fs::write(path, json).map_err(|e| ConvertError::Io {
        path: path.display().to_string(),
        message: format!("Failed to write output file: {}", e),
    })
}
