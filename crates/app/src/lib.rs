//! # effect-log-app
//!
//! The immutable [`Logger`], its composition operators, and the HTTP
//! logging middleware.
//! This crate depends on `ports`, `domain`, `shared`, and `config`.

pub mod logger;
pub mod middleware;
pub mod ops;

pub use logger::Logger;
pub use middleware::{
    BINARY_BODY, HttpLoggerMiddleware, REQUEST_MESSAGE, RESPONSE_MESSAGE, RequestScope,
    TRUNCATION_MARKER, level_for_status,
};
pub use ops::{LoggerOp, with_context, with_min_level, with_span, with_writer};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
