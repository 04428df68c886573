//! Structured JSON logger
//!
//! One log line = one event. Logs are synchronous and unbuffered, with
//! deterministic field order: severity, event, then the caller's fields
//! in the order given.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger.
pub struct Logger;

impl Logger {
    /// Logs an event to stdout.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let _ = Self::write_line(&mut io::stdout(), severity, event, fields);
    }

    /// Logs an event to stderr (failures).
    pub fn log_stderr(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let _ = Self::write_line(&mut io::stderr(), severity, event, fields);
    }

    fn write_line<W: Write>(
        writer: &mut W,
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
    ) -> io::Result<()> {
        let mut line = String::with_capacity(128);
        line.push('{');
        push_field(&mut line, "severity", severity.as_str());
        line.push(',');
        push_field(&mut line, "event", event);
        for (key, value) in fields {
            line.push(',');
            push_field(&mut line, key, value);
        }
        line.push('}');
        line.push('\n');
        writer.write_all(line.as_bytes())
    }
}

fn push_field(line: &mut String, key: &str, value: &str) {
    push_json_string(line, key);
    line.push(':');
    push_json_string(line, value);
}

fn push_json_string(line: &mut String, s: &str) {
    line.push('"');
    for c in s.chars() {
        match c {
            '"' => line.push_str("\\\""),
            '\\' => line.push_str("\\\\"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                line.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => line.push(c),
        }
    }
    line.push('"');
}
