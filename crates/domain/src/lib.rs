//! # effect-log-domain
//!
//! Value types for structured logging.
//!
//! - **Levels** - `LogLevel` with total ordering and name parsing
//! - **Context** - `Context` and the `Fields` map it accumulates
//! - **Entries** - `LogEntry`, the record handed to writers
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No I/O; every value here is immutable once built

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use effect_log_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod context;
pub mod entry;
pub mod level;

pub use context::{Context, Fields, fields};
pub use entry::LogEntry;
pub use level::{LevelParseError, LogLevel};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
