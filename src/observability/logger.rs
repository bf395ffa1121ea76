//! Structured JSON line logger
//!
//! - Deterministic key ordering: event, severity, then fields by name
//! - Explicit severity levels
//! - One log line = one event
//! - Synchronous, flushed per line

use std::fmt;
use std::io::{self, Write};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-step detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Input was rejected or partially skipped
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
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

/// A structured logger writing JSON lines to `W`
///
/// Lines below `min_severity` are dropped. Write failures are swallowed:
/// logging never changes the outcome of the operation being logged.
pub struct Logger<W: Write = io::Stderr> {
    writer: W,
    min_severity: Severity,
}

impl Logger<io::Stderr> {
    /// Logger on standard error at INFO
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Logger<W> {
    pub fn new(writer: W) -> Self {
        Self::with_min_severity(writer, Severity::Info)
    }

    pub fn with_min_severity(writer: W, min_severity: Severity) -> Self {
        Self {
            writer,
            min_severity,
        }
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Consumes the logger, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Log an event name with the given severity and fields
    pub fn log(&mut self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity < self.min_severity {
            return;
        }
        let line = render_line(severity, event, fields);
        let _ = self.writer.write_all(line.as_bytes());
        let _ = self.writer.flush();
    }

    /// Log a typed event at its default severity
    pub fn event(&mut self, event: Event, fields: &[(&str, &str)]) {
        self.log(event.severity(), event.as_str(), fields);
    }

    pub fn trace(&mut self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    pub fn info(&mut self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    pub fn warn(&mut self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Warn, event, fields);
    }

    pub fn error(&mut self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Error, event, fields);
    }
}

/// Renders one log line, newline included
fn render_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);

    output.push('{');

    output.push_str("\"event\":\"");
    escape_json_string(&mut output, event);
    output.push('"');

    output.push_str(",\"severity\":\"");
    output.push_str(severity.as_str());
    output.push('"');

    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push_str(",\"");
        escape_json_string(&mut output, key);
        output.push_str("\":\"");
        escape_json_string(&mut output, value);
        output.push('"');
    }

    output.push_str("}\n");
    output
}

fn escape_json_string(output: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
}

/// Capture one log line for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut logger = Logger::with_min_severity(Vec::new(), Severity::Trace);
    logger.log(severity, event, fields);
    String::from_utf8(logger.into_inner()).unwrap()
}
