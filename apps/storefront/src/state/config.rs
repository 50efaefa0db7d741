//! # Configuration State
//!
//! Storefront configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_PRODUCTS_PATH=./data/products.json                      │
//! │     STOREFRONT_PAGE_SIZE=12                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $STOREFRONT_CONFIG, or                                             │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     data/products.json, data/offers.json, 6 per page                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "Glow Skincare"
//! products_path = "/srv/storefront/products.json"
//! offers_path = "/srv/storefront/offers.json"
//! page_size = 6
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after startup, so no lock is needed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use storefront_core::validation::validate_page_size;
use storefront_core::{ValidationError, DEFAULT_PAGE_SIZE};

/// Names of the environment variables the config reads.
pub mod env_keys {
    pub const CONFIG: &str = "STOREFRONT_CONFIG";
    pub const STORE_NAME: &str = "STOREFRONT_STORE_NAME";
    pub const PRODUCTS_PATH: &str = "STOREFRONT_PRODUCTS_PATH";
    pub const OFFERS_PATH: &str = "STOREFRONT_OFFERS_PATH";
    pub const PAGE_SIZE: &str = "STOREFRONT_PAGE_SIZE";
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Store name (shown in the shell banner)
    pub store_name: String,

    /// Location of `products.json`
    pub products_path: PathBuf,

    /// Location of `offers.json`
    pub offers_path: PathBuf,

    /// Products per page of the product list
    pub page_size: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_name: "Storefront".to_string(),
            products_path: PathBuf::from("data/products.json"),
            offers_path: PathBuf::from("data/offers.json"),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, `STOREFRONT_CONFIG`, or the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// `load` with the environment supplied as a lookup function.
    fn load_with<F>(config_path: Option<PathBuf>, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = config_path
            .or_else(|| var(env_keys::CONFIG).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(var)?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "store_name".to_string(),
            }
            .into());
        }

        validate_page_size(self.page_size)?;
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var(env_keys::STORE_NAME) {
            self.store_name = name;
        }

        if let Some(path) = var(env_keys::PRODUCTS_PATH) {
            debug!(path = %path, "Overriding products path from environment");
            self.products_path = PathBuf::from(path);
        }

        if let Some(path) = var(env_keys::OFFERS_PATH) {
            debug!(path = %path, "Overriding offers path from environment");
            self.offers_path = PathBuf::from(path);
        }

        if let Some(size) = var(env_keys::PAGE_SIZE) {
            self.page_size = size
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(env_keys::PAGE_SIZE.to_string()))?;
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

/// Read-only configuration for the session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    config: StorefrontConfig,
}

impl ConfigState {
    pub fn new(config: StorefrontConfig) -> Self {
        ConfigState { config }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn store_name(&self) -> &str {
        &self.config.store_name
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }
}
