//! Effective config inspection.

use crate::InfraResult;
use effect_log_config::{LogEnv, load_logging_config_from_path, to_pretty_json};
use std::collections::BTreeMap;
use std::path::Path;

/// Load and validate the effective config, returning pretty JSON.
pub fn load_effective_config_json(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> InfraResult<String> {
    let env = LogEnv::from_map(env)?;
    let config = load_logging_config_from_path(config_path, overrides_json, &env)?;
    to_pretty_json(&config)
}
