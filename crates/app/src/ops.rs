//! Reusable logger transformations for [`Logger::pipe`].

use crate::Logger;
use effect_log_domain::{Fields, LogLevel};
use effect_log_ports::SharedWriter;
use std::fmt;
use std::sync::Arc;

/// A total `Logger -> Logger` function.
///
/// Ops are cheap to clone and can be stored and applied to many loggers.
#[derive(Clone)]
pub struct LoggerOp(Arc<dyn Fn(Logger) -> Logger + Send + Sync>);

impl LoggerOp {
    /// Wrap an arbitrary transformation.
    pub fn new(op: impl Fn(Logger) -> Logger + Send + Sync + 'static) -> Self {
        Self(Arc::new(op))
    }

    /// Run the transformation.
    #[must_use]
    pub fn apply(&self, logger: Logger) -> Logger {
        (self.0)(logger)
    }
}

impl fmt::Debug for LoggerOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LoggerOp")
    }
}

/// Op form of [`Logger::with_context`].
#[must_use]
pub fn with_context(fields: Fields) -> LoggerOp {
    LoggerOp::new(move |logger| logger.with_context(fields.clone()))
}

/// Op form of [`Logger::with_span`].
#[must_use]
pub fn with_span(span_id: impl Into<String>, trace_id: Option<String>) -> LoggerOp {
    let span_id = span_id.into();
    LoggerOp::new(move |logger| logger.with_span(span_id.clone(), trace_id.clone()))
}

/// Op form of [`Logger::with_min_level`].
#[must_use]
pub fn with_min_level(level: LogLevel) -> LoggerOp {
    LoggerOp::new(move |logger| logger.with_min_level(level))
}

/// Op form of [`Logger::with_writer`].
#[must_use]
pub fn with_writer(writer: SharedWriter) -> LoggerOp {
    LoggerOp::new(move |logger| logger.with_writer(Arc::clone(&writer)))
}
