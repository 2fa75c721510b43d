//! Shared output streams for console writers.

use effect_log_shared::{ErrorEnvelope, Result};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A line-oriented output handle that can be shared between writers.
///
/// Clones refer to the same underlying stream; each line is written and
/// flushed under one lock so concurrent lines never interleave.
#[derive(Clone)]
pub struct OutputStream {
    label: &'static str,
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputStream {
    /// Process standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::labelled("stdout", io::stdout())
    }

    /// Process standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::labelled("stderr", io::stderr())
    }

    /// Wrap an arbitrary sink, such as an in-memory buffer in tests.
    #[must_use]
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self::labelled("custom", writer)
    }

    fn labelled(label: &'static str, writer: impl Write + Send + 'static) -> Self {
        Self {
            label,
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Short name of the stream for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Write `line` followed by a newline, then flush.
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        write_terminated(&mut **guard, line).map_err(|error| {
            ErrorEnvelope::io("write log line", &error).with_metadata("stream", self.label)
        })
    }

    /// Flush the underlying stream.
    pub fn flush(&self) -> Result<()> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.flush().map_err(|error| {
            ErrorEnvelope::io("flush log stream", &error).with_metadata("stream", self.label)
        })
    }
}

fn write_terminated(writer: &mut dyn Write, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

impl Default for OutputStream {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OutputStream")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect_log_testkit::CapturedStream;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lines_are_newline_terminated() -> Result<()> {
        let captured = CapturedStream::new();
        let stream = OutputStream::from_writer(captured.clone());
        stream.write_line("first")?;
        stream.clone().write_line("second")?;

        assert_eq!(captured.contents(), "first\nsecond\n");
        assert_eq!(stream.label(), "custom");
        Ok(())
    }

    #[test]
    fn write_failures_carry_the_stream_label() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let stream = OutputStream::from_writer(BrokenPipe);
        let error = stream
            .write_line("lost")
            .err()
            .ok_or("broken pipe must fail")?;
        assert_eq!(error.code.code(), "io");
        assert!(error.class.is_retriable());
        assert_eq!(error.metadata.get("stream").map(String::as_str), Some("custom"));
        Ok(())
    }
}
