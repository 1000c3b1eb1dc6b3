//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::HarnessConfig;
use std::path::Path;

/// Loads and validates a `strobe.toml` configuration from a project
/// directory.
///
/// Reads `<project_dir>/strobe.toml`, parses it, and validates required
/// fields.
pub fn load_config(project_dir: &Path) -> Result<HarnessConfig, ConfigError> {
    let config_path = project_dir.join("strobe.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `strobe.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<HarnessConfig, ConfigError> {
    let config: HarnessConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are consistent.
fn validate_config(config: &HarnessConfig) -> Result<(), ConfigError> {
    if config.harness.name.is_empty() {
        return Err(ConfigError::MissingField("harness.name".to_string()));
    }
    if let Some(scope) = &config.trace.scope {
        if scope.is_empty() {
            return Err(ConfigError::ValidationError(
                "trace.scope must not be empty".to_string(),
            ));
        }
    }
    if config.trace.depth == Some(0) {
        return Err(ConfigError::ValidationError(
            "trace.depth must be at least 1".to_string(),
        ));
    }
    if config.run.max_cycles == Some(0) {
        return Err(ConfigError::ValidationError(
            "run.max_cycles must be at least 1".to_string(),
        ));
    }
    Ok(())
}
