//! The facade exposes a complete pipeline without reaching into inner crates.

use effect_log::{
    FilterWriter, HttpLoggerMiddleware, HttpLoggingConfig, JsonConsoleWriter, LogLevel, Logger,
    MultiWriter, OutputStream, SharedWriter, fields, with_context, with_span,
};
use effect_log_testkit::{CapturedStream, FailingWriter, RecordingWriter, StaticRequest};
use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;

#[test]
fn composed_pipeline_routes_by_content() -> Result<(), Box<dyn Error>> {
    let stream = CapturedStream::new();
    let slow = Arc::new(RecordingWriter::new());
    let json: SharedWriter =
        Arc::new(JsonConsoleWriter::new().with_stream(OutputStream::from_writer(stream.clone())));
    let slow_sink: SharedWriter = slow.clone();
    let filtered: SharedWriter = Arc::new(FilterWriter::new(slow_sink, |entry| {
        entry
            .context
            .get("duration_ms")
            .and_then(Value::as_f64)
            .is_some_and(|ms| ms > 1000.0)
    }));
    let writer: SharedWriter = Arc::new(MultiWriter::new([json, filtered]));

    let logger = Logger::new(writer).pipe([
        with_context(fields([("service", "search")])),
        with_span("span-9", Some("trace-9".to_string())),
    ]);
    logger.info("fast query", Some(fields([("duration_ms", 12.0)])))?;
    logger.info("slow query", Some(fields([("duration_ms", 2400.0)])))?;

    assert_eq!(stream.lines().len(), 2);
    assert_eq!(slow.messages(), vec!["slow query".to_string()]);

    let first: Value = serde_json::from_str(stream.lines().first().ok_or("missing line")?)?;
    assert_eq!(first["context"]["service"], json!("search"));
    assert_eq!(first["span_id"], json!("span-9"));
    assert_eq!(first["trace_id"], json!("trace-9"));
    Ok(())
}

#[test]
fn failing_child_does_not_starve_siblings() -> Result<(), Box<dyn Error>> {
    let recorder = Arc::new(RecordingWriter::new());
    let failing: SharedWriter = Arc::new(FailingWriter::new("disk full"));
    let recording: SharedWriter = recorder.clone();
    let writer: SharedWriter = Arc::new(MultiWriter::new([failing, recording]));
    let logger = Logger::new(writer);

    let error = logger.warn("still delivered", None).err().ok_or("expected error")?;
    assert_eq!(error.code.to_string(), "writer:multi_write_failed");
    assert_eq!(recorder.messages(), vec!["still delivered".to_string()]);
    Ok(())
}

#[test]
fn middleware_through_the_facade() -> Result<(), Box<dyn Error>> {
    let recorder = Arc::new(RecordingWriter::new());
    let writer: SharedWriter = recorder.clone();
    let logger = Logger::new(writer).with_min_level(LogLevel::Debug);
    let middleware = HttpLoggerMiddleware::new(logger, HttpLoggingConfig::default())?;

    let scope = middleware.log_request(&StaticRequest::new("POST", "/orders"))?;
    scope.logger().debug("validating", None)?;
    middleware.log_response(&scope, &404_u16)?;

    let entries = recorder.entries();
    assert_eq!(entries.len(), 3);
    let request_ids: Vec<Option<&Value>> = entries
        .iter()
        .map(|entry| entry.context.get("request_id"))
        .collect();
    assert!(request_ids.iter().all(|id| *id == Some(&json!(scope.request_id()))));
    assert_eq!(entries.last().map(|entry| entry.level), Some(LogLevel::Warn));
    Ok(())
}
