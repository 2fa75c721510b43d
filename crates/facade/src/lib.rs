//! # effect-log
//!
//! Structured logging built from immutable values. A [`Logger`] pairs a
//! [`Context`], a threshold and a shared [`LogWriter`]; every `with_*`
//! call returns a new logger, and writers nest freely.
//!
//! ```
//! use effect_log::{
//!     BufferedWriter, JsonConsoleWriter, LogLevel, Logger, MultiWriter, OutputStream, SharedWriter,
//!     fields, with_context, with_min_level,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> effect_log::Result<()> {
//! let json: SharedWriter = Arc::new(JsonConsoleWriter::new().with_stream(OutputStream::stderr()));
//! let batched: SharedWriter = Arc::new(BufferedWriter::new(json.clone(), 16)?);
//! let writer: SharedWriter = Arc::new(MultiWriter::new([batched, json]));
//!
//! let logger = Logger::new(writer).pipe([
//!     with_context(fields([("service", "checkout")])),
//!     with_min_level(LogLevel::Debug),
//! ]);
//! let request_logger = logger.with_span("span-1", Some("trace-1".to_string()));
//! request_logger.info("order placed", Some(fields([("order_id", 42)])))?;
//! logger.flush()?;
//! # Ok(())
//! # }
//! ```
//!
//! HTTP hosts wrap their request and response types in [`HttpRequest`] and
//! [`HttpResponse`] and drive an [`HttpLoggerMiddleware`]:
//!
//! ```
//! use effect_log::{HttpLoggerMiddleware, HttpLoggingConfig, HttpRequest, console_logger};
//!
//! struct Incoming<'a> {
//!     method: &'a str,
//!     path: &'a str,
//! }
//!
//! impl HttpRequest for Incoming<'_> {
//!     fn method(&self) -> Option<&str> {
//!         Some(self.method)
//!     }
//!
//!     fn path(&self) -> Option<&str> {
//!         Some(self.path)
//!     }
//! }
//!
//! # fn main() -> effect_log::Result<()> {
//! let config = HttpLoggingConfig::default().with_exclude_paths(["/health"]);
//! let middleware = HttpLoggerMiddleware::new(console_logger(), config)?;
//!
//! let scope = middleware.log_request(&Incoming { method: "GET", path: "/orders" })?;
//! scope.logger().debug("loading orders", None)?;
//! middleware.log_response(&scope, &200_u16)?;
//! # Ok(())
//! # }
//! ```

pub use effect_log_adapters::{
    BufferedWriter, ConsoleWriter, EntryPredicate, FileMode, FileWriter, FilterWriter,
    JsonConsoleWriter, MultiWriter, OutputStream, iso_timestamp, render_console, render_json,
};
pub use effect_log_app::{
    BINARY_BODY, HttpLoggerMiddleware, Logger, LoggerOp, REQUEST_MESSAGE, RESPONSE_MESSAGE,
    RequestScope, TRUNCATION_MARKER, level_for_status, with_context, with_min_level, with_span,
    with_writer,
};
pub use effect_log_config::{
    FileSinkConfig, HttpLoggingConfig, LogEnv, LogFormat, LoggerConfig, LoggingConfig,
    StreamTarget, load_logging_config_from_path, load_logging_config_from_sources,
    load_logging_config_std_env, parse_logging_config_json, parse_logging_config_toml,
};
pub use effect_log_domain::{Context, Fields, LevelParseError, LogEntry, LogLevel, fields};
pub use effect_log_infra::{
    InfraError, build_http_middleware, build_logger, build_logger_on, build_writer, build_writer_on,
    console_logger,
    load_effective_config_json, logger_from_env, logger_from_std_env, validate_env_parsing,
};
pub use effect_log_ports::{Headers, HttpRequest, HttpResponse, LogWriter, RequestBody, SharedWriter};
pub use effect_log_shared::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, Result};

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
