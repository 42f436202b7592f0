//! Configuration loading and management
//!
//! Configuration is read in two layers: an optional YAML file named by
//! `PRODUCT_API_CONFIG`, then environment variables on top of it.
//!
//! # Environment Variables
//!
//! - `PRODUCT_API_CONFIG` - Path of a YAML configuration file
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `API_KEY` - Shared secret for guarded operations (default: SECRET_KEY)
//! - `SEED_PRODUCTS` - Load the sample catalogue at startup (default: true)
//!
//! # Example file
//!
//! ```yaml
//! port: 8080
//! api_key: change-me
//! seed: false
//! auth:
//!   delete: api_key
//! ```

use crate::core::auth::{AuthPolicy, DEFAULT_API_KEY_HEADER};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "PRODUCT_API_CONFIG";

/// Secret used when none is configured
pub const DEFAULT_API_KEY: &str = "SECRET_KEY";

/// Configuration errors that can occur during loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which write operations require the API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub create: AuthPolicy,
    pub update: AuthPolicy,
    pub delete: AuthPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            create: AuthPolicy::ApiKey,
            update: AuthPolicy::ApiKey,
            delete: AuthPolicy::Public,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Shared secret for guarded operations
    pub api_key: String,

    /// Header carrying the secret
    pub api_key_header: String,

    /// Load the sample catalogue at startup
    pub seed: bool,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Per-operation auth policies
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_key: DEFAULT_API_KEY.to_string(),
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            seed: true,
            log_level: "info".to_string(),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load the file named by `PRODUCT_API_CONFIG` (if any), then apply
    /// environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `HOST`, `PORT`, `API_KEY` and `SEED_PRODUCTS` from `lookup`
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }

        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string(), port))?;
        }

        if let Some(api_key) = lookup("API_KEY") {
            if api_key.is_empty() {
                return Err(ConfigError::InvalidEnvVar(
                    "API_KEY".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            self.api_key = api_key;
        }

        if let Some(seed) = lookup("SEED_PRODUCTS") {
            self.seed = match seed.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidEnvVar("SEED_PRODUCTS".to_string(), seed)),
            };
        }

        Ok(self)
    }

    /// `host:port` string to bind to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the built-in secret is still in use
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }
}
