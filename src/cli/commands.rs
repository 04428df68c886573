//! CLI command implementation
//!
//! The tool has a single command: convert a directory of export shards
//! into JSON files. Destination handling mirrors what users expect from
//! a regenerating converter: the destination directory is created if
//! absent, and stale `*.json` files from a previous run are deleted
//! before conversion starts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::{self, RunSummary};
use crate::entity::BinaryEntityDecoder;
use crate::observability::{Logger, Severity};

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Parses arguments and runs the conversion.
pub fn run() -> CliResult<()> {
    run_with(Cli::parse_args())
}

/// Runs the conversion with the given arguments.
///
/// Exits non-zero (via the returned error) when the source directory is
/// invalid, the destination cannot be prepared, or any shard failed —
/// after all shards have been attempted.
pub fn run_with(args: Cli) -> CliResult<()> {
    let source_dir = validate_source(&args.source_dir)?;
    let dest_dir = match args.dest_dir {
        Some(dir) => dir,
        None => source_dir.join("json"),
    };

    fs::create_dir_all(&dest_dir).map_err(|e| CliError::DestDir {
        path: dest_dir.display().to_string(),
        message: e.to_string(),
    })?;
    clean_stale_json(&dest_dir)?;

    let decoder = BinaryEntityDecoder::new();
    let summary = convert::convert_dir(&source_dir, &dest_dir, &decoder)?;
    report(&summary);

    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::ShardFailures {
            failed: summary.failed.len(),
            attempted: summary.attempted(),
        })
    }
}

fn validate_source(source_dir: &Path) -> CliResult<PathBuf> {
    if !source_dir.is_dir() {
        return Err(CliError::SourceMissing(source_dir.display().to_string()));
    }
    Ok(source_dir.to_path_buf())
}

/// Deletes `*.json` files left over from a previous run.
///
/// Only direct children with a `.json` extension are touched; anything
/// else in the destination directory is left alone.
fn clean_stale_json(dest_dir: &Path) -> CliResult<()> {
    let entries = fs::read_dir(dest_dir).map_err(|e| CliError::DestDir {
        path: dest_dir.display().to_string(),
        message: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| CliError::DestDir {
            path: dest_dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            Logger::log(
                Severity::Info,
                "stale_output_deleted",
                &[("path", &path.display().to_string())],
            );
            fs::remove_file(&path).map_err(|e| CliError::DestDir {
                path: path.display().to_string(),
                message: format!("Failed to delete stale output: {}", e),
            })?;
        }
    }
    Ok(())
}

fn report(summary: &RunSummary) {
    Logger::log(
        Severity::Info,
        "run_completed",
        &[
            ("shards_converted", &summary.converted.to_string()),
            ("shards_failed", &summary.failed.len().to_string()),
            ("documents", &summary.documents.to_string()),
        ],
    );
}
