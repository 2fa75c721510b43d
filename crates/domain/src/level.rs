//! Severity levels and their parsing rules.

use effect_log_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from least to most severe.
///
/// The derived ordering is the threshold ordering: an entry is admitted by a
/// gate when `entry_level >= min_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum LogLevel {
    /// Finest-grained diagnostics.
    Trace,
    /// Developer diagnostics.
    Debug,
    /// Normal operational messages.
    #[default]
    Info,
    /// Something unexpected that did not fail the operation.
    Warn,
    /// A failed operation.
    Error,
    /// A failure the process is unlikely to recover from.
    Fatal,
}

impl LogLevel {
    /// Every level, in ascending severity.
    pub const ALL: [Self; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Upper-case level name as rendered by writers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns true when an entry at `level` passes a gate set to `self`.
    #[must_use]
    pub fn admits(self, level: Self) -> bool {
        level >= self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Rejected level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    /// The raw input that failed to parse.
    pub input: String,
}

impl LevelParseError {
    fn error_code() -> ErrorCode {
        ErrorCode::new("config", "invalid_level")
    }
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown log level `{}` (expected TRACE, DEBUG, INFO, WARN, ERROR or FATAL)",
            self.input
        )
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        Self::expected(LevelParseError::error_code(), error.to_string())
            .with_metadata("input", error.input)
    }
}

impl FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            _ => Err(LevelParseError {
                input: input.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LevelParseError;

    fn try_from(value: String) -> Result<Self, LevelParseError> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn levels_are_totally_ordered() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn parse_accepts_any_case_and_warning_alias() -> Result<(), LevelParseError> {
        assert_eq!("info".parse::<LogLevel>()?, LogLevel::Info);
        assert_eq!(" Debug ".parse::<LogLevel>()?, LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>()?, LogLevel::Warn);
        assert_eq!("fatal".parse::<LogLevel>()?, LogLevel::Fatal);
        Ok(())
    }

    #[test]
    fn parse_failure_maps_to_config_error() -> Result<(), Box<dyn std::error::Error>> {
        let error = "LOUD"
            .parse::<LogLevel>()
            .err()
            .ok_or("LOUD must not parse")?;
        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.code.to_string(), "config:invalid_level");
        assert_eq!(envelope.metadata.get("input").map(String::as_str), Some("LOUD"));
        Ok(())
    }

    #[test]
    fn owned_strings_convert_like_parse() {
        assert_eq!(LogLevel::try_from("error".to_string()), Ok(LogLevel::Error));
        assert_eq!(
            LogLevel::try_from("chatty".to_string()),
            Err(LevelParseError {
                input: "chatty".to_string(),
            })
        );
    }

    #[test]
    fn serde_uses_upper_case_names() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&LogLevel::Warn)?, "\"WARN\"");
        let parsed: LogLevel = serde_json::from_str("\"warning\"")?;
        assert_eq!(parsed, LogLevel::Warn);
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
        Ok(())
    }

    fn any_level() -> impl Strategy<Value = LogLevel> {
        prop::sample::select(LogLevel::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn display_round_trips_through_parse(level in any_level()) {
            prop_assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }

        #[test]
        fn admits_matches_ordering(gate in any_level(), level in any_level()) {
            prop_assert_eq!(gate.admits(level), level >= gate);
        }
    }
}
