//! # effect-log-ports
//!
//! Capability traits at the edges of the logging core.
//!
//! This crate defines the writer contract every sink implements and the
//! framework-neutral request/response views the HTTP middleware consumes.
//! It depends only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod http;
pub mod writer;

pub use http::{Headers, HttpRequest, HttpResponse, RequestBody};
pub use writer::{LogWriter, SharedWriter};

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without naming `effect-log-domain` directly.
pub use effect_log_domain::{Fields, LogEntry, LogLevel};
