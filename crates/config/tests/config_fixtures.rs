//! Integration tests for parsing config fixtures from the workspace testkit.

use effect_log_config::{
    LogEnv, LogFormat, LoggingConfig, StreamTarget, load_logging_config_from_path,
    parse_logging_config_json, parse_logging_config_toml,
};
use effect_log_domain::LogLevel;
use effect_log_shared::ErrorCode;
use serde_json::json;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn read_fixture(relative: &str) -> Result<String, Box<dyn Error>> {
    Ok(fs::read_to_string(fixture_path(relative))?)
}

#[test]
fn parses_valid_fixture_and_normalizes() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logging.valid.json")?;
    let config = parse_logging_config_json(&contents)?;

    assert_eq!(config.logger.level, LogLevel::Debug);
    assert_eq!(config.logger.format, LogFormat::Json);
    assert!(!config.logger.colors);
    assert_eq!(config.logger.stream, StreamTarget::Stderr);
    assert_eq!(config.logger.fields.get("service"), Some(&json!("checkout")));
    assert_eq!(config.logger.buffer_size, Some(50));

    let file = config.logger.file.as_ref().ok_or("file sink missing")?;
    assert_eq!(file.path, PathBuf::from("logs/checkout.log"));
    assert!(!file.append);
    assert_eq!(file.level, Some(LogLevel::Info));

    assert!(config.http.include_headers);
    assert!(config.http.redact_headers);
    assert_eq!(config.http.max_body_size, 2048);
    assert_eq!(config.http.exclude_paths, vec!["/health", "/metrics"]);
    assert!(config.http.log_requests, "unset keys keep their defaults");
    Ok(())
}

#[test]
fn parses_default_toml_fixture() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logging.default.toml")?;
    let config = parse_logging_config_toml(&contents)?;
    assert_eq!(config, LoggingConfig::default());
    Ok(())
}

#[test]
fn loads_fixture_by_extension() -> Result<(), Box<dyn Error>> {
    let path = fixture_path("config/logging.default.toml");
    let config = load_logging_config_from_path(Some(&path), None, &LogEnv::default())?;
    assert_eq!(config.logger.level, LogLevel::Info);

    let path = fixture_path("config/logging.valid.json");
    let config = load_logging_config_from_path(
        Some(&path),
        Some(r#"{ "http": { "includeBody": false } }"#),
        &LogEnv::default(),
    )?;
    assert!(!config.http.include_body);
    assert!(config.http.include_headers);
    Ok(())
}

#[test]
fn invalid_fixture_reports_error_code() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/logging.invalid.json")?;
    let error = parse_logging_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected invalid fixture error"))?;

    assert_eq!(error.code, ErrorCode::new("config", "invalid_max_body_size"));
    assert_eq!(error.metadata.get("value").map(String::as_str), Some("0"));
    assert_eq!(error.metadata.get("min").map(String::as_str), Some("1"));
    Ok(())
}
