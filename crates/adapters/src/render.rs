//! Text and JSON renderings of log entries.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use effect_log_domain::{Fields, LogEntry, LogLevel};
use effect_log_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use serde::Serialize;
use serde_json::Value;

const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
/// ANSI reset sequence appended to colored lines.
pub const RESET: &str = "\x1b[0m";

/// ANSI color prefix for a level. INFO keeps the terminal default.
#[must_use]
pub const fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace | LogLevel::Debug => DIM,
        LogLevel::Info => "",
        LogLevel::Warn => YELLOW,
        LogLevel::Error | LogLevel::Fatal => RED,
    }
}

/// Render `timestamp LEVEL message key=value... [span=..] [trace=..]`.
#[must_use]
pub fn render_console(entry: &LogEntry, colors: bool) -> String {
    let mut line = String::new();
    if colors {
        line.push_str(level_color(entry.level));
    }
    line.push_str(&format!(
        "{} {} {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level,
        entry.message
    ));
    for (key, value) in &entry.context {
        line.push_str(&format!(" {key}={}", console_value(value)));
    }
    if let Some(span_id) = &entry.span_id {
        line.push_str(&format!(" span={span_id}"));
    }
    if let Some(trace_id) = &entry.trace_id {
        line.push_str(&format!(" trace={trace_id}"));
    }
    if colors {
        line.push_str(RESET);
    }
    line
}

fn console_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// ISO-8601 timestamp in UTC; microseconds appear only when non-zero.
#[must_use]
pub fn iso_timestamp(timestamp: &DateTime<Utc>) -> String {
    let format = if timestamp.nanosecond() / 1_000 == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    timestamp.to_rfc3339_opts(format, true)
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: LogLevel,
    message: &'a str,
    context: &'a Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    span_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
}

/// Render one JSON object, without a trailing newline.
pub fn render_json(entry: &LogEntry) -> Result<String> {
    let record = JsonRecord {
        timestamp: iso_timestamp(&entry.timestamp),
        level: entry.level,
        message: &entry.message,
        context: &entry.context,
        span_id: entry.span_id.as_deref(),
        trace_id: entry.trace_id.as_deref(),
    };
    serde_json::to_string(&record).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("writer", "serialize_failed"),
            format!("log entry serialization failed: {error}"),
            ErrorClass::NonRetriable,
        )
    })
}
