//! Environment validation helpers.

use effect_log_config::{LogEnv, LoggingConfig, apply_env_overrides};
use effect_log_shared::ErrorEnvelope;
use std::collections::BTreeMap;

/// Infra-level error type (shared error envelope).
pub type InfraError = ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

/// Validate that the provided env overrides parse and merge into a valid config.
pub fn validate_env_parsing(env: &BTreeMap<String, String>) -> InfraResult<()> {
    let parsed = LogEnv::from_map(env)?;
    apply_env_overrides(LoggingConfig::default(), &parsed)?;
    Ok(())
}
