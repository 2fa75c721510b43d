//! # effect-log-infra
//!
//! Composition root: turns validated config and env into writer stacks,
//! loggers and HTTP middleware.
//! This crate depends on `app`, `adapters`, `config`, and `shared`.

/// Effective config inspection.
pub mod config_check;
/// Environment validation helpers.
pub mod env_check;
/// Logger and middleware construction.
mod logger_factory;
/// Writer stack assembly.
mod writer_factory;

pub use config_check::load_effective_config_json;
pub use env_check::{InfraError, InfraResult, validate_env_parsing};
pub use logger_factory::{
    build_http_middleware, build_logger, build_logger_on, console_logger, logger_from_env,
    logger_from_std_env,
};
pub use writer_factory::{build_writer, build_writer_on};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
