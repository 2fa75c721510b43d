//! # effect-log-adapters
//!
//! Writer implementations for the `LogWriter` port.
//!
//! - Sinks: [`ConsoleWriter`], [`JsonConsoleWriter`], [`FileWriter`]
//! - Composites: [`MultiWriter`], [`FilterWriter`], [`BufferedWriter`]
//!
//! Composites hold their children as `SharedWriter` handles, so any writer
//! (including another composite) can be nested inside them.
//!
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod buffered;
pub mod console;
pub mod file;
pub mod filter;
pub mod json_console;
pub mod multi;
pub mod render;
pub mod stream;

pub use buffered::BufferedWriter;
pub use console::ConsoleWriter;
pub use file::{FileMode, FileWriter};
pub use filter::{EntryPredicate, FilterWriter};
pub use json_console::JsonConsoleWriter;
pub use multi::MultiWriter;
pub use render::{iso_timestamp, render_console, render_json};
pub use stream::OutputStream;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
