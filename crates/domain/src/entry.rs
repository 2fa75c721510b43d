//! The immutable record produced by one emission call.

use crate::{Context, Fields, LogLevel};
use chrono::{DateTime, Utc};

/// One emitted log event.
///
/// Built once per admitted emission and passed by reference down the writer
/// chain. Writers never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Capture time of the emission.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
    /// Logger context flattened with call-site fields.
    pub context: Fields,
    /// Span id copied from the emitting logger.
    pub span_id: Option<String>,
    /// Trace id copied from the emitting logger.
    pub trace_id: Option<String>,
}

impl LogEntry {
    /// Entry stamped with the current time.
    #[must_use]
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(Utc::now(), level, message)
    }

    /// Entry stamped with an explicit time.
    #[must_use]
    pub fn at(timestamp: DateTime<Utc>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            context: Fields::new(),
            span_id: None,
            trace_id: None,
        }
    }

    /// Entry for an emission against `context`, with call-site fields applied.
    #[must_use]
    pub fn from_context(
        level: LogLevel,
        message: impl Into<String>,
        context: &Context,
        extra: Option<Fields>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            context: context.flatten_with(extra),
            span_id: context.span_id().map(str::to_string),
            trace_id: context.trace_id().map(str::to_string),
        }
    }

    /// Replace the context fields.
    #[must_use]
    pub fn with_fields(mut self, context: Fields) -> Self {
        self.context = context;
        self
    }

    /// Set tracing identifiers.
    #[must_use]
    pub fn with_ids(mut self, span_id: Option<String>, trace_id: Option<String>) -> Self {
        self.span_id = span_id;
        self.trace_id = trace_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn entry_copies_context_and_ids() {
        let context = Context::from_fields(fields([("service", "api")]))
            .with_span("span-123", Some("trace-456".to_string()));
        let entry = LogEntry::from_context(
            LogLevel::Warn,
            "slow",
            &context,
            Some(fields([("elapsed_ms", 900)])),
        );

        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.message, "slow");
        assert_eq!(entry.context.get("service"), Some(&json!("api")));
        assert_eq!(entry.context.get("elapsed_ms"), Some(&json!(900)));
        assert_eq!(entry.span_id.as_deref(), Some("span-123"));
        assert_eq!(entry.trace_id.as_deref(), Some("trace-456"));
    }

    #[test]
    fn explicit_timestamp_is_kept() {
        let when = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).single();
        let Some(when) = when else {
            return;
        };
        let entry = LogEntry::at(when, LogLevel::Info, "hi")
            .with_fields(fields([("k", "v")]))
            .with_ids(Some("s".to_string()), None);
        assert_eq!(entry.timestamp, when);
        assert_eq!(entry.span_id.as_deref(), Some("s"));
        assert!(entry.trace_id.is_none());
    }
}
