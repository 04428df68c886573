//! CLI argument definitions using clap
//!
//! Usage: `fs2json [-d DEST_DIR] SOURCE_DIR`

use clap::Parser;
use std::path::PathBuf;

/// Hierarchical datastore export to JSON converter
#[derive(Parser, Debug)]
#[command(name = "fs2json")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the binary export shards
    pub source_dir: PathBuf,

    /// Destination directory for generated JSON (default: SOURCE_DIR/json)
    #[arg(short = 'd', long)]
    pub dest_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
