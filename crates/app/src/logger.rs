//! The immutable logger value.

use crate::LoggerOp;
use effect_log_domain::{Context, Fields, LogEntry, LogLevel};
use effect_log_ports::SharedWriter;
use effect_log_shared::Result;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A context, a threshold and a writer.
///
/// Every `with_*` method returns a new logger and leaves the receiver alone.
/// Derived loggers share the writer, so buffering and fan-out stay consistent
/// across them.
#[derive(Clone)]
pub struct Logger {
    context: Context,
    min_level: LogLevel,
    writer: SharedWriter,
}

impl Logger {
    /// Logger with an empty context and an INFO threshold.
    #[must_use]
    pub fn new(writer: SharedWriter) -> Self {
        Self {
            context: Context::new(),
            min_level: LogLevel::Info,
            writer,
        }
    }

    /// Accumulated context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Inclusive threshold.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// The shared writer.
    #[must_use]
    pub const fn writer(&self) -> &SharedWriter {
        &self.writer
    }

    /// Returns true when an entry at `level` would reach the writer.
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.min_level.admits(level)
    }

    /// Emit `message` at `level` with optional call-site fields.
    ///
    /// Below the threshold this returns `Ok(())` without building an entry or
    /// touching the writer. Call-site fields win over context fields.
    ///
    /// # Errors
    ///
    /// Whatever the writer reports for a failed write.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        fields: Option<Fields>,
    ) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let entry = LogEntry::from_context(level, message, &self.context, fields);
        self.writer.write(&entry)
    }

    /// Emit at TRACE.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn trace(&self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log(LogLevel::Trace, message, fields)
    }

    /// Emit at DEBUG.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn debug(&self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log(LogLevel::Debug, message, fields)
    }

    /// Emit at INFO.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn info(&self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log(LogLevel::Info, message, fields)
    }

    /// Emit at WARN.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn warn(&self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log(LogLevel::Warn, message, fields)
    }

    /// Emit at ERROR.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn error(&self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log(LogLevel::Error, message, fields)
    }

    /// Emit at FATAL.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn fatal(&self, message: impl Into<String>, fields: Option<Fields>) -> Result<()> {
        self.log(LogLevel::Fatal, message, fields)
    }

    /// Flush the writer.
    ///
    /// # Errors
    ///
    /// Whatever the writer reports for a failed flush.
    pub fn flush(&self) -> Result<()> {
        self.writer.flush()
    }

    /// New logger with `fields` merged into the context.
    #[must_use]
    pub fn with_context(&self, fields: Fields) -> Self {
        Self::from_parts(self.context.merge(fields), self.min_level, Arc::clone(&self.writer))
    }

    /// New logger with the span replaced; the trace id changes only when given.
    #[must_use]
    pub fn with_span(&self, span_id: impl Into<String>, trace_id: Option<String>) -> Self {
        Self::from_parts(
            self.context.with_span(span_id, trace_id),
            self.min_level,
            Arc::clone(&self.writer),
        )
    }

    /// New logger with a different threshold.
    #[must_use]
    pub fn with_min_level(&self, min_level: LogLevel) -> Self {
        Self::from_parts(self.context.clone(), min_level, Arc::clone(&self.writer))
    }

    /// New logger writing somewhere else.
    #[must_use]
    pub fn with_writer(&self, writer: SharedWriter) -> Self {
        Self::from_parts(self.context.clone(), self.min_level, writer)
    }

    /// Apply `ops` left to right, threading each result into the next.
    #[must_use]
    pub fn pipe<I>(&self, ops: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<LoggerOp>,
    {
        ops.into_iter()
            .fold(self.clone(), |logger, op| op.borrow().apply(logger))
    }

    /// Logger assembled from explicit parts.
    #[must_use]
    pub const fn from_parts(context: Context, min_level: LogLevel, writer: SharedWriter) -> Self {
        Self {
            context,
            min_level,
            writer,
        }
    }

    /// Returns true when both loggers hand entries to the same writer instance.
    #[must_use]
    pub fn shares_writer_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("context", &self.context)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect_log_domain::fields;
    use effect_log_testkit::{FailingWriter, RecordingWriter};
    use serde_json::json;

    fn recording() -> (Arc<RecordingWriter>, Logger) {
        let writer = Arc::new(RecordingWriter::new());
        let logger = Logger::new(writer.clone());
        (writer, logger)
    }

    #[test]
    fn defaults_to_info_with_empty_context() {
        let (_, logger) = recording();
        assert_eq!(logger.min_level(), LogLevel::Info);
        assert!(logger.context().data().is_empty());
        assert!(logger.context().span_id().is_none());
    }

    #[test]
    fn emission_builds_entry_from_context() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let (writer, logger) = recording();
        logger
            .with_context(fields([("user_id", json!(123))]))
            .with_span("span-1", Some("trace-1".to_string()))
            .info("User logged in", Some(fields([("ip", "10.0.0.1")])))?;

        let entry = writer.last().ok_or("no entry recorded")?;
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "User logged in");
        assert_eq!(entry.context.get("user_id"), Some(&json!(123)));
        assert_eq!(entry.context.get("ip"), Some(&json!("10.0.0.1")));
        assert_eq!(entry.span_id.as_deref(), Some("span-1"));
        assert_eq!(entry.trace_id.as_deref(), Some("trace-1"));
        Ok(())
    }

    #[test]
    fn suppressed_levels_never_reach_the_writer() -> Result<()> {
        let (writer, logger) = recording();
        let logger = logger.with_min_level(LogLevel::Warn);

        logger.trace("trace message", None)?;
        logger.debug("debug message", None)?;
        logger.info("info message", None)?;
        assert!(writer.is_empty());

        logger.warn("warn message", None)?;
        logger.error("error message", None)?;
        logger.fatal("fatal message", None)?;
        let levels: Vec<LogLevel> = writer.entries().iter().map(|entry| entry.level).collect();
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Error, LogLevel::Fatal]);
        Ok(())
    }

    #[test]
    fn writer_failures_reach_the_caller() {
        let writer = Arc::new(FailingWriter::new("disk full"));
        let logger = Logger::new(writer.clone());

        assert!(logger.error("boom", None).is_err());
        assert!(logger.debug("filtered", None).is_ok());
        assert_eq!(writer.attempts(), 1);
    }

    #[test]
    fn with_writer_swaps_only_the_writer() -> Result<()> {
        let (first, logger) = recording();
        let second = Arc::new(RecordingWriter::new());
        let logger = logger.with_context(fields([("service", "api")]));
        let moved = logger.with_writer(second.clone());

        assert!(!moved.shares_writer_with(&logger));
        assert_eq!(moved.context(), logger.context());
        moved.info("to second", None)?;
        assert!(first.is_empty());
        assert_eq!(second.len(), 1);
        Ok(())
    }

    #[test]
    fn flush_forwards_to_writer() -> Result<()> {
        let (writer, logger) = recording();
        logger.with_context(fields([("a", 1)])).flush()?;
        assert_eq!(writer.flush_count(), 1);
        Ok(())
    }
}
