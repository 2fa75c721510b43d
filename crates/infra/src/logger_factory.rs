//! Logger and middleware construction from config and env.

use crate::InfraResult;
use crate::writer_factory::{build_writer, build_writer_on};
use effect_log_adapters::{ConsoleWriter, OutputStream};
use effect_log_app::{HttpLoggerMiddleware, Logger};
use effect_log_config::{LogEnv, LoggerConfig, LoggingConfig, apply_env_overrides};
use effect_log_ports::SharedWriter;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Root logger for `config`: its threshold, its static fields, its sinks.
pub fn build_logger(config: &LoggerConfig) -> InfraResult<Logger> {
    Ok(root_logger(config, build_writer(config)?))
}

/// Like [`build_logger`] with console output redirected to `stream`.
pub fn build_logger_on(config: &LoggerConfig, stream: OutputStream) -> InfraResult<Logger> {
    Ok(root_logger(config, build_writer_on(config, stream)?))
}

/// Default config with env overrides applied, then built.
pub fn logger_from_env(env: &BTreeMap<String, String>) -> InfraResult<Logger> {
    let env = LogEnv::from_map(env)?;
    let config = apply_env_overrides(LoggingConfig::default(), &env)?;
    build_logger(&config.logger)
}

/// [`logger_from_env`] over the process environment.
pub fn logger_from_std_env() -> InfraResult<Logger> {
    let env = LogEnv::from_std_env()?;
    let config = apply_env_overrides(LoggingConfig::default(), &env)?;
    build_logger(&config.logger)
}

/// Colored console writer on stdout behind an INFO threshold.
#[must_use]
pub fn console_logger() -> Logger {
    Logger::new(Arc::new(ConsoleWriter::new()))
}

/// Middleware over a logger built from `config.logger`.
pub fn build_http_middleware(config: &LoggingConfig) -> InfraResult<HttpLoggerMiddleware> {
    let logger = build_logger(&config.logger)?;
    HttpLoggerMiddleware::new(logger, config.http.clone())
}

fn root_logger(config: &LoggerConfig, writer: SharedWriter) -> Logger {
    let logger = Logger::new(writer).with_min_level(config.level);
    if config.fields.is_empty() {
        logger
    } else {
        logger.with_context(config.fields.clone())
    }
}
