//! # effect-log-testkit
//!
//! Test helpers: writer doubles, captured output streams, and static HTTP
//! request/response fixtures.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod errors;
pub mod http;
pub mod stream;
pub mod writers;

pub use http::{StaticBody, StaticRequest, StaticResponse};
pub use stream::CapturedStream;
pub use writers::{FailingWriter, RecordingWriter};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
