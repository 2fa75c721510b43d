//! # effect-log-config
//!
//! Configuration schema, validation, and loading for loggers and the HTTP
//! middleware. This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + overrides + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_BUFFER_SIZE, ENV_COLORS, ENV_ENVIRONMENT, ENV_FILE, ENV_FILE_APPEND, ENV_FORMAT,
    ENV_LEVEL, ENV_SERVICE_NAME, ENV_SERVICE_VERSION, EnvParseError, LogEnv, apply_env_overrides,
};
pub use load::{
    load_logging_config_from_path, load_logging_config_from_sources, load_logging_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    ConfigError, DEFAULT_MAX_BODY_SIZE, FileSinkConfig, HttpLoggingConfig, LogFormat,
    LoggerConfig, LoggingConfig, MAX_BODY_SIZE, MIN_BODY_SIZE, StreamTarget,
    parse_logging_config_json, parse_logging_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
