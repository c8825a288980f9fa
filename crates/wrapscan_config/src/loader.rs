//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ScanConfig;
use std::path::Path;

/// Loads and validates a `scan.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ScanConfig, ConfigError> {
    let config_path = project_dir.join("scan.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `scan.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ScanConfig, ConfigError> {
    let config: ScanConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.scan.capture_cycles == 0 {
        return Err(ConfigError::ValidationError(
            "capture_cycles must be at least 1".to_string(),
        ));
    }
    if config.scan.max_propagation_iterations == 0 {
        return Err(ConfigError::ValidationError(
            "max_propagation_iterations must be at least 1".to_string(),
        ));
    }
    if config.cores.peripheral_prefixes.len() < 2 {
        return Err(ConfigError::ValidationError(
            "extest requires at least two peripheral core prefixes".to_string(),
        ));
    }
    Ok(())
}
