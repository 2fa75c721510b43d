//! Configuration schema for loggers and the HTTP middleware.

use effect_log_domain::{Fields, LogLevel};
use effect_log_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Smallest accepted `maxBodySize`.
pub const MIN_BODY_SIZE: usize = 1;
/// Largest accepted `maxBodySize`.
pub const MAX_BODY_SIZE: usize = 10_000_000;
/// Default `maxBodySize`, in characters.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Root logger and sink settings.
    pub logger: LoggerConfig,
    /// HTTP middleware settings.
    pub http: HttpLoggingConfig,
}

impl LoggingConfig {
    /// Validate both sections, normalizing where the schema allows.
    pub fn validate_and_normalize(mut self) -> Result<Self, ConfigError> {
        self.logger.validate()?;
        self.http = self.http.validate_and_normalize()?;
        Ok(self)
    }
}

/// Console rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `timestamp LEVEL message key=value...` text.
    #[default]
    Console,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a format name, ignoring case.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Console output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

/// File sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileSinkConfig {
    /// Target file; parent directories are created on first write.
    pub path: PathBuf,
    /// Append to existing content instead of truncating.
    #[serde(default = "default_true")]
    pub append: bool,
    /// Threshold for this sink; defaults to the logger level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
}

impl FileSinkConfig {
    /// Appending sink at `path` with no threshold of its own.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append: true,
            level: None,
        }
    }
}

/// Root logger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Logger threshold, also applied to the console sink.
    pub level: LogLevel,
    /// Console rendering.
    pub format: LogFormat,
    /// ANSI colors for text output.
    pub colors: bool,
    /// Console stream.
    pub stream: StreamTarget,
    /// Static context applied to the root logger.
    #[serde(skip_serializing_if = "Fields::is_empty")]
    pub fields: Fields,
    /// Optional JSON-lines file sink.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileSinkConfig>,
    /// Batch size for the file sink; unset writes through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<u32>,
    /// Optional file receiving only ERROR and above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Console,
            colors: true,
            stream: StreamTarget::Stdout,
            fields: Fields::new(),
            file: None,
            buffer_size: None,
            error_file: None,
        }
    }
}

impl LoggerConfig {
    /// Check sink settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .file
            .as_ref()
            .is_some_and(|file| file.path.as_os_str().is_empty())
        {
            return Err(ConfigError::EmptyFilePath { field: "file.path" });
        }
        if self
            .error_file
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::EmptyFilePath { field: "errorFile" });
        }
        match self.buffer_size {
            Some(0) => Err(ConfigError::InvalidBufferSize { value: 0 }),
            Some(_) if self.file.is_none() => Err(ConfigError::BufferWithoutFile),
            _ => Ok(()),
        }
    }
}

/// HTTP middleware configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct HttpLoggingConfig {
    /// Attach request headers as a `headers` field.
    pub include_headers: bool,
    /// Attach the decoded request body as a `body` field.
    pub include_body: bool,
    /// Body length, in characters, beyond which the body is truncated.
    pub max_body_size: usize,
    /// Paths whose request entry is skipped; exact match or path prefix.
    pub exclude_paths: Vec<String>,
    /// Emit the "HTTP request" entry.
    pub log_requests: bool,
    /// Emit the "HTTP response" entry.
    pub log_responses: bool,
    /// Replace values of credential-like headers with `[REDACTED]`.
    pub redact_headers: bool,
}

impl Default for HttpLoggingConfig {
    fn default() -> Self {
        Self {
            include_headers: false,
            include_body: false,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            exclude_paths: Vec::new(),
            log_requests: true,
            log_responses: true,
            redact_headers: false,
        }
    }
}

impl HttpLoggingConfig {
    /// Validate limits and paths; trims, sorts and dedupes exclusions.
    pub fn validate_and_normalize(mut self) -> Result<Self, ConfigError> {
        if !(MIN_BODY_SIZE..=MAX_BODY_SIZE).contains(&self.max_body_size) {
            return Err(ConfigError::MaxBodySizeOutOfRange {
                value: self.max_body_size,
                min: MIN_BODY_SIZE,
                max: MAX_BODY_SIZE,
            });
        }

        let mut paths = Vec::with_capacity(self.exclude_paths.len());
        for raw in self.exclude_paths {
            let path = raw.trim();
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidExcludePath { path: raw });
            }
            paths.push(path.to_string());
        }
        paths.sort();
        paths.dedup();
        self.exclude_paths = paths;
        Ok(self)
    }

    /// Set the excluded paths.
    #[must_use]
    pub fn with_exclude_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_paths = paths.into_iter().map(Into::into).collect();
        self
    }
}

const fn default_true() -> bool {
    true
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `maxBodySize` is out of bounds.
    MaxBodySizeOutOfRange {
        /// Value provided.
        value: usize,
        /// Minimum allowed value.
        min: usize,
        /// Maximum allowed value.
        max: usize,
    },
    /// An excluded path does not start with `/`.
    InvalidExcludePath {
        /// Offending entry.
        path: String,
    },
    /// A file sink path is empty.
    EmptyFilePath {
        /// Field name in the config file.
        field: &'static str,
    },
    /// `bufferSize` is zero.
    InvalidBufferSize {
        /// Value provided.
        value: u32,
    },
    /// `bufferSize` is set without a file sink to buffer.
    BufferWithoutFile,
}

impl ConfigError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MaxBodySizeOutOfRange { .. } => ErrorCode::new("config", "invalid_max_body_size"),
            Self::InvalidExcludePath { .. } => ErrorCode::new("config", "invalid_exclude_path"),
            Self::EmptyFilePath { .. } => ErrorCode::new("config", "invalid_file_path"),
            Self::InvalidBufferSize { .. } | Self::BufferWithoutFile => {
                ErrorCode::new("config", "invalid_buffer_size")
            },
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxBodySizeOutOfRange { value, min, max } => write!(
                formatter,
                "http.maxBodySize must be between {min} and {max} (got {value})"
            ),
            Self::InvalidExcludePath { path } => {
                write!(formatter, "http.excludePaths entry must start with '/': {path}")
            },
            Self::EmptyFilePath { field } => write!(formatter, "logger.{field} must be non-empty"),
            Self::InvalidBufferSize { .. } => {
                formatter.write_str("logger.bufferSize must be at least 1")
            },
            Self::BufferWithoutFile => {
                formatter.write_str("logger.bufferSize requires logger.file")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ErrorEnvelope {
    fn from(error: ConfigError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            ConfigError::MaxBodySizeOutOfRange { value, min, max } => {
                envelope = envelope
                    .with_metadata("value", value.to_string())
                    .with_metadata("min", min.to_string())
                    .with_metadata("max", max.to_string());
            },
            ConfigError::InvalidExcludePath { path } => {
                envelope = envelope.with_metadata("path", path);
            },
            ConfigError::EmptyFilePath { field } => {
                envelope = envelope.with_metadata("field", field);
            },
            ConfigError::InvalidBufferSize { value } => {
                envelope = envelope.with_metadata("value", value.to_string());
            },
            ConfigError::BufferWithoutFile => {},
        }

        envelope
    }
}

/// Parse a config document from a JSON string, applying validation and normalization.
pub fn parse_logging_config_json(input: &str) -> Result<LoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a config document from a TOML string, applying validation and normalization.
pub fn parse_logging_config_toml(input: &str) -> Result<LoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}
