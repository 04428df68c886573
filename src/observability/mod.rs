//! Observability
//!
//! Structured JSON logging for run and shard progress.

mod logger;

pub use logger::{Logger, Severity};
