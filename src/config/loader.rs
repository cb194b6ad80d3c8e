//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the upstream API base URL.
pub const ENV_UPSTREAM_BASE: &str = "KASHITE_UPSTREAM_BASE";
/// Environment variable naming the static asset root directory.
pub const ENV_STATIC_ROOT: &str = "KASHITE_STATIC_ROOT";
/// Environment variable naming the listener bind address.
pub const ENV_BIND_ADDRESS: &str = "KASHITE_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment and CLI overrides are applied by the caller after this
/// returns; the final config is validated again before use.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment-variable overrides on top of a loaded config.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(base) = env::var(ENV_UPSTREAM_BASE) {
        config.upstream.base_url = base;
    }
    if let Ok(root) = env::var(ENV_STATIC_ROOT) {
        config.static_assets.root = PathBuf::from(root);
    }
    if let Ok(bind) = env::var(ENV_BIND_ADDRESS) {
        config.listener.bind_address = bind;
    }
}
