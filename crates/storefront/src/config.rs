//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `WOODORA_HOST` - Bind address (default: 127.0.0.1)
//! - `WOODORA_PORT` - Listen port (default: 3000)
//! - `WOODORA_BASE_URL` - Public URL for the storefront (default: http://localhost:3000)
//! - `WOODORA_DATA_DIR` - Directory for the listing catalog and carts (default: data)
//! - `WOODORA_PRICING_CATALOG` - Path to a JSON price list (default: built-in tables)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use thiserror::Error;
use woodora_core::PricingCatalog;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read pricing catalog {0}: {1}")]
    PricingCatalog(PathBuf, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory holding `furniture.json` and the cart store
    pub data_dir: PathBuf,
    /// Price list used for quotes
    pub pricing: PricingCatalog,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// pricing catalog file cannot be read.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("WOODORA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("WOODORA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("WOODORA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("WOODORA_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("WOODORA_BASE_URL", "http://localhost:3000");
        let data_dir = PathBuf::from(get_env_or_default("WOODORA_DATA_DIR", "data"));

        let pricing = match get_optional_env("WOODORA_PRICING_CATALOG") {
            Some(path) => load_pricing_catalog(Path::new(&path))?,
            None => PricingCatalog::woodora(),
        };

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            pricing,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Configuration for local runs and tests, rooted at `data_dir`.
    #[must_use]
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            data_dir: data_dir.into(),
            pricing: PricingCatalog::woodora(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a JSON price list.
fn load_pricing_catalog(path: &Path) -> Result<PricingCatalog, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::PricingCatalog(path.to_path_buf(), e.to_string()))?;
    serde_json::from_str(&text)
        .map_err(|e| ConfigError::PricingCatalog(path.to_path_buf(), e.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a sample rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::local("data");
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = StorefrontConfig::local("data");
        assert!(!config.is_secure());
        config.base_url = "https://woodora.example".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_load_pricing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.json");
        let custom = PricingCatalog {
            categories: PricingCatalog::woodora().categories.into_iter().take(1).collect(),
            ..PricingCatalog::default()
        };
        std::fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

        let loaded = load_pricing_catalog(&path).unwrap();
        assert_eq!(loaded.categories.len(), 1);
        assert!(loaded.materials.is_empty());
    }

    #[test]
    fn test_load_pricing_catalog_missing_file() {
        let err = load_pricing_catalog(Path::new("/nonexistent/pricing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::PricingCatalog(_, _)));
    }
}
