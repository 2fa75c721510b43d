//! Line-delimited JSON console writer.

use crate::render::render_json;
use crate::stream::OutputStream;
use effect_log_domain::{LogEntry, LogLevel};
use effect_log_ports::LogWriter;
use effect_log_shared::Result;

/// Writes one JSON object per entry to a stream.
#[derive(Debug, Clone)]
pub struct JsonConsoleWriter {
    stream: OutputStream,
    min_level: LogLevel,
}

impl JsonConsoleWriter {
    /// Writer on stdout that admits every level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stream: OutputStream::stdout(),
            min_level: LogLevel::Trace,
        }
    }

    /// Set the output stream.
    #[must_use]
    pub fn with_stream(mut self, stream: OutputStream) -> Self {
        self.stream = stream;
        self
    }

    /// Set this writer's own threshold.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

impl Default for JsonConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for JsonConsoleWriter {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        if !self.min_level.admits(entry.level) {
            return Ok(());
        }
        self.stream.write_line(&render_json(entry)?)
    }

    fn flush(&self) -> Result<()> {
        self.stream.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect_log_domain::fields;
    use effect_log_testkit::CapturedStream;
    use serde_json::{Value, json};

    #[test]
    fn emits_one_object_per_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let captured = CapturedStream::new();
        let writer =
            JsonConsoleWriter::new().with_stream(OutputStream::from_writer(captured.clone()));
        let entry = LogEntry::now(LogLevel::Info, "test message")
            .with_fields(fields([("key", "value")]))
            .with_ids(Some("span-1".into()), None);
        writer.write(&entry)?;

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        let payload: Value = serde_json::from_str(lines.first().ok_or("missing line")?)?;
        assert_eq!(payload["level"], json!("INFO"));
        assert_eq!(payload["message"], json!("test message"));
        assert_eq!(payload["context"]["key"], json!("value"));
        assert_eq!(payload["span_id"], json!("span-1"));
        assert!(payload.get("trace_id").is_none());
        Ok(())
    }

    #[test]
    fn drops_entries_below_threshold() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let captured = CapturedStream::new();
        let writer = JsonConsoleWriter::new()
            .with_stream(OutputStream::from_writer(captured.clone()))
            .with_min_level(LogLevel::Error);
        writer.write(&LogEntry::now(LogLevel::Info, "info message"))?;
        writer.write(&LogEntry::now(LogLevel::Error, "error message"))?;

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        let payload: Value = serde_json::from_str(lines.first().ok_or("missing line")?)?;
        assert_eq!(payload["level"], json!("ERROR"));
        Ok(())
    }
}
