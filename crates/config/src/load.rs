//! Config loading helpers (file + overrides + env).
//!
//! The loader owns the merge order and surfaces user-facing errors as
//! `ErrorEnvelope`s.

use crate::schema::{FileSinkConfig, LogFormat, LoggingConfig, StreamTarget};
use crate::{LogEnv, apply_env_overrides};
use effect_log_domain::{Fields, LogLevel};
use effect_log_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the logging config from sources using a fixed precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`LogEnv`)
/// - overrides JSON (partial config)
/// - config JSON (file content)
/// - defaults (`LoggingConfig::default()`)
pub fn load_logging_config_from_sources(
    config_json: Option<&str>,
    overrides_json: Option<&str>,
    env: &LogEnv,
) -> Result<LoggingConfig, ErrorEnvelope> {
    let config = match config_json {
        None => LoggingConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };
    merge_and_validate(config, overrides_json, env)
}

/// Load the logging config from an optional file path (`.json` or `.toml`).
pub fn load_logging_config_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &LogEnv,
) -> Result<LoggingConfig, ErrorEnvelope> {
    let config = match config_path {
        None => LoggingConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let text = read_config_file(path)?;
            tracing::debug!(path = %path.display(), ?format, "loading logging config");
            parse_config_unvalidated(&text, format)?
        },
    };
    merge_and_validate(config, overrides_json, env)
}

/// Load the logging config from the process environment and an optional file.
pub fn load_logging_config_std_env(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<LoggingConfig, ErrorEnvelope> {
    let env = LogEnv::from_std_env()?;
    load_logging_config_from_path(config_path, overrides_json, &env)
}

/// Serialize the config as pretty JSON with a trailing newline.
pub fn to_pretty_json(config: &LoggingConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_json"),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as pretty TOML with a trailing newline.
pub fn to_pretty_toml(config: &LoggingConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn merge_and_validate(
    mut config: LoggingConfig,
    overrides_json: Option<&str>,
    env: &LogEnv,
) -> Result<LoggingConfig, ErrorEnvelope> {
    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        overrides.apply(&mut config);
    }

    // env is applied last and also validates the merged result.
    apply_env_overrides(config, env)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<LoggingConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<LoggingConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid overrides JSON: {error}"),
        )
        .with_metadata("source", "overrides")
    })
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct LoggingConfigOverrides {
    logger: LoggerOverrides,
    http: HttpOverrides,
}

impl LoggingConfigOverrides {
    fn apply(self, config: &mut LoggingConfig) {
        self.logger.apply(config);
        self.http.apply(config);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct LoggerOverrides {
    level: Option<LogLevel>,
    format: Option<LogFormat>,
    colors: Option<bool>,
    stream: Option<StreamTarget>,
    /// Merged key by key into the configured fields.
    fields: Fields,
    file: Option<FileSinkConfig>,
    buffer_size: Option<u32>,
    error_file: Option<PathBuf>,
}

impl LoggerOverrides {
    fn apply(self, config: &mut LoggingConfig) {
        let logger = &mut config.logger;
        set(&mut logger.level, self.level);
        set(&mut logger.format, self.format);
        set(&mut logger.colors, self.colors);
        set(&mut logger.stream, self.stream);
        logger.fields.extend(self.fields);
        set_opt(&mut logger.file, self.file);
        set_opt(&mut logger.buffer_size, self.buffer_size);
        set_opt(&mut logger.error_file, self.error_file);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct HttpOverrides {
    include_headers: Option<bool>,
    include_body: Option<bool>,
    max_body_size: Option<usize>,
    exclude_paths: Option<Vec<String>>,
    log_requests: Option<bool>,
    log_responses: Option<bool>,
    redact_headers: Option<bool>,
}

impl HttpOverrides {
    fn apply(self, config: &mut LoggingConfig) {
        let http = &mut config.http;
        set(&mut http.include_headers, self.include_headers);
        set(&mut http.include_body, self.include_body);
        set(&mut http.max_body_size, self.max_body_size);
        set(&mut http.exclude_paths, self.exclude_paths);
        set(&mut http.log_requests, self.log_requests);
        set(&mut http.log_responses, self.log_responses);
        set(&mut http.redact_headers, self.redact_headers);
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn set_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    #[test]
    fn override_precedence_is_deterministic() -> Result<(), Box<dyn Error>> {
        let config_json = r#"{
          "logger": { "level": "DEBUG", "fields": { "service": "billing", "region": "eu" } },
          "http": { "maxBodySize": 256 }
        }"#;
        let overrides_json = r#"{
          "logger": { "level": "WARN", "fields": { "region": "us" } },
          "http": { "maxBodySize": 512 }
        }"#;
        let env = LogEnv {
            level: Some(LogLevel::Error),
            ..LogEnv::default()
        };

        let config = load_logging_config_from_sources(Some(config_json), Some(overrides_json), &env)?;
        assert_eq!(config.logger.level, LogLevel::Error);
        assert_eq!(config.http.max_body_size, 512);
        assert_eq!(config.logger.fields.get("service"), Some(&json!("billing")));
        assert_eq!(config.logger.fields.get("region"), Some(&json!("us")));
        Ok(())
    }

    #[test]
    fn serialization_is_deterministic() -> Result<(), Box<dyn Error>> {
        let config = load_logging_config_from_sources(None, None, &LogEnv::default())?;
        let first = to_pretty_json(&config)?;
        assert_eq!(first, to_pretty_json(&config)?);
        assert!(first.ends_with('\n'));

        let toml_text = to_pretty_toml(&config)?;
        let reparsed: LoggingConfig = toml::from_str(&toml_text)?;
        assert_eq!(reparsed, config);
        Ok(())
    }

    #[test]
    fn invalid_config_value_can_be_fixed_by_overrides() -> Result<(), Box<dyn Error>> {
        let config_json = r#"{ "http": { "maxBodySize": 0 } }"#;
        let overrides_json = r#"{ "http": { "maxBodySize": 64 } }"#;
        let config =
            load_logging_config_from_sources(Some(config_json), Some(overrides_json), &LogEnv::default())?;
        assert_eq!(config.http.max_body_size, 64);
        Ok(())
    }

    #[test]
    fn malformed_overrides_report_their_source() -> Result<(), Box<dyn Error>> {
        let error = load_logging_config_from_sources(None, Some(r#"{ "logger": "#), &LogEnv::default())
            .err()
            .ok_or("malformed overrides must fail")?;
        assert_eq!(error.code, ErrorCode::new("config", "invalid_json"));
        assert_eq!(error.metadata.get("source").map(String::as_str), Some("overrides"));
        Ok(())
    }

    #[test]
    fn unknown_override_keys_are_rejected() {
        let result = load_logging_config_from_sources(
            None,
            Some(r#"{ "logger": { "verbosity": 3 } }"#),
            &LogEnv::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() -> Result<(), Box<dyn Error>> {
        let error = load_logging_config_from_path(
            Some(Path::new("logging.yaml")),
            None,
            &LogEnv::default(),
        )
        .err()
        .ok_or("yaml must be rejected")?;
        assert_eq!(error.code, ErrorCode::new("config", "unsupported_format"));
        assert_eq!(error.metadata.get("extension").map(String::as_str), Some("yaml"));
        Ok(())
    }

    #[test]
    fn missing_file_reports_not_found() -> Result<(), Box<dyn Error>> {
        let error = load_logging_config_from_path(
            Some(Path::new("/definitely/not/here/logging.toml")),
            None,
            &LogEnv::default(),
        )
        .err()
        .ok_or("missing file must fail")?;
        assert_eq!(error.code, ErrorCode::new("config", "config_file_not_found"));
        Ok(())
    }
}
