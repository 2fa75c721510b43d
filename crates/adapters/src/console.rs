//! Human-readable console writer.

use crate::render::render_console;
use crate::stream::OutputStream;
use effect_log_domain::{LogEntry, LogLevel};
use effect_log_ports::LogWriter;
use effect_log_shared::Result;

/// Writes `timestamp LEVEL message key=value...` lines to a stream.
#[derive(Debug, Clone)]
pub struct ConsoleWriter {
    stream: OutputStream,
    colors: bool,
    min_level: LogLevel,
}

impl ConsoleWriter {
    /// Colored writer on stdout that admits every level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stream: OutputStream::stdout(),
            colors: true,
            min_level: LogLevel::Trace,
        }
    }

    /// Set the output stream.
    #[must_use]
    pub fn with_stream(mut self, stream: OutputStream) -> Self {
        self.stream = stream;
        self
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub const fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Set this writer's own threshold.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// This writer's threshold.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for ConsoleWriter {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        if !self.min_level.admits(entry.level) {
            return Ok(());
        }
        self.stream.write_line(&render_console(entry, self.colors))
    }

    fn flush(&self) -> Result<()> {
        self.stream.flush()
    }
}
