//! CLI command implementations.

pub mod listings;
pub mod quote;

use std::path::PathBuf;

use woodora_storefront::config::{ConfigError, StorefrontConfig};

/// Load storefront configuration, overriding the data directory if given.
///
/// # Errors
///
/// Returns `ConfigError` if the environment is invalid.
pub fn load_config(data_dir: Option<PathBuf>) -> Result<StorefrontConfig, ConfigError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "loaded configuration");
    Ok(config)
}
