//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: a variable that is present but empty or malformed fails
//! fast instead of silently falling back to the default.

use crate::schema::{FileSinkConfig, LogFormat, LoggingConfig};
use effect_log_domain::LogLevel;
use effect_log_shared::{ErrorCode, ErrorEnvelope};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Env var: logger threshold (`TRACE` .. `FATAL`, case-insensitive).
pub const ENV_LEVEL: &str = "EFFECT_LOG_LEVEL";
/// Env var: console format (`console` | `json`).
pub const ENV_FORMAT: &str = "EFFECT_LOG_FORMAT";
/// Env var: ANSI colors (true/false).
pub const ENV_COLORS: &str = "EFFECT_LOG_COLORS";
/// Env var: JSON-lines file sink path.
pub const ENV_FILE: &str = "EFFECT_LOG_FILE";
/// Env var: append to the file sink (true/false).
pub const ENV_FILE_APPEND: &str = "EFFECT_LOG_FILE_APPEND";
/// Env var: file sink batch size.
pub const ENV_BUFFER_SIZE: &str = "EFFECT_LOG_BUFFER_SIZE";
/// Env var: service name, logged as `service`.
pub const ENV_SERVICE_NAME: &str = "EFFECT_LOG_SERVICE_NAME";
/// Env var: service version, logged as `version`.
pub const ENV_SERVICE_VERSION: &str = "EFFECT_LOG_SERVICE_VERSION";
/// Env var: deployment environment, logged as `environment`.
pub const ENV_ENVIRONMENT: &str = "EFFECT_LOG_ENV";

const ALL_VARS: [&str; 9] = [
    ENV_LEVEL,
    ENV_FORMAT,
    ENV_COLORS,
    ENV_FILE,
    ENV_FILE_APPEND,
    ENV_BUFFER_SIZE,
    ENV_SERVICE_NAME,
    ENV_SERVICE_VERSION,
    ENV_ENVIRONMENT,
];

/// Parsed environment overrides. Absent variables stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEnv {
    /// Logger threshold.
    pub level: Option<LogLevel>,
    /// Console format.
    pub format: Option<LogFormat>,
    /// ANSI colors.
    pub colors: Option<bool>,
    /// File sink path.
    pub file: Option<PathBuf>,
    /// File sink append flag.
    pub file_append: Option<bool>,
    /// File sink batch size.
    pub buffer_size: Option<u32>,
    /// `service` field.
    pub service_name: Option<Box<str>>,
    /// `version` field.
    pub service_version: Option<Box<str>>,
    /// `environment` field.
    pub environment: Option<Box<str>>,
}

impl LogEnv {
    /// Parse overrides from a key/value map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            level: parse_optional_level(map, ENV_LEVEL)?,
            format: parse_optional_format(map, ENV_FORMAT)?,
            colors: parse_optional_bool(map, ENV_COLORS)?,
            file: parse_optional_trimmed_string(map, ENV_FILE)?
                .map(|path| PathBuf::from(path.as_ref())),
            file_append: parse_optional_bool(map, ENV_FILE_APPEND)?,
            buffer_size: parse_optional_u32(map, ENV_BUFFER_SIZE)?,
            service_name: parse_optional_trimmed_string(map, ENV_SERVICE_NAME)?,
            service_version: parse_optional_trimmed_string(map, ENV_SERVICE_VERSION)?,
            environment: parse_optional_trimmed_string(map, ENV_ENVIRONMENT)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no variable was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Apply env overrides over `base`, then validate the result.
///
/// `EFFECT_LOG_FILE_APPEND` only takes effect when a file sink is configured,
/// either in `base` or through `EFFECT_LOG_FILE`.
pub fn apply_env_overrides(
    base: LoggingConfig,
    env: &LogEnv,
) -> Result<LoggingConfig, ErrorEnvelope> {
    let mut config = base;
    let logger = &mut config.logger;

    if let Some(level) = env.level {
        logger.level = level;
    }
    if let Some(format) = env.format {
        logger.format = format;
    }
    if let Some(colors) = env.colors {
        logger.colors = colors;
    }
    if let Some(path) = &env.file {
        let previous = logger.file.take();
        logger.file = Some(FileSinkConfig {
            path: path.clone(),
            ..previous.unwrap_or_else(|| FileSinkConfig::new(path.clone()))
        });
    }
    if let (Some(append), Some(file)) = (env.file_append, logger.file.as_mut()) {
        file.append = append;
    }
    if let Some(size) = env.buffer_size {
        logger.buffer_size = Some(size);
    }
    for (field, value) in [
        ("service", &env.service_name),
        ("version", &env.service_version),
        ("environment", &env.environment),
    ] {
        if let Some(value) = value {
            logger
                .fields
                .insert(field.into(), Value::String(value.to_string()));
        }
    }

    if !env.is_empty() {
        tracing::debug!(?env, "applied logging env overrides");
    }
    config.validate_and_normalize().map_err(Into::into)
}

/// Env parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Level env var named no known level.
    InvalidLevel {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidLevel { .. } => ErrorCode::new("config", "invalid_level"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
            Self::InvalidLevel { var, .. } => write!(
                formatter,
                "{var} must be one of TRACE, DEBUG, INFO, WARN, ERROR, FATAL"
            ),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => {
                envelope = envelope.with_metadata("env_var", var);
            },
            EnvParseError::InvalidBool { var, value }
            | EnvParseError::InvalidInt { var, value }
            | EnvParseError::InvalidLevel { var, value }
            | EnvParseError::InvalidEnum { var, value } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value);
            },
        }

        envelope
    }
}

fn present<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<(&'a String, &'a str)>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some((raw, trimmed)))
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    Ok(present(map, var)?.map(|(_, trimmed)| trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some((raw, trimmed)) = present(map, var)? else {
        return Ok(None);
    };
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some((raw, trimmed)) = present(map, var)? else {
        return Ok(None);
    };
    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_level(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<LogLevel>, EnvParseError> {
    let Some((raw, trimmed)) = present(map, var)? else {
        return Ok(None);
    };
    trimmed
        .parse::<LogLevel>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidLevel {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_format(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<LogFormat>, EnvParseError> {
    let Some((raw, trimmed)) = present(map, var)? else {
        return Ok(None);
    };
    LogFormat::parse(trimmed)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}
