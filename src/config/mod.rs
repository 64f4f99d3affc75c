// Configuration module

mod models;

pub use models::*;

use crate::error::{Result, VisionError};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `AZURE_VISION_ENDPOINT` / `AZURE_VISION_KEY` (highest)
    /// 2. Environment variables (prefix: VIZOR_)
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&Self::default_config_path()).required(false))
            // Override with environment variables (prefix: VIZOR_)
            .add_source(Environment::with_prefix("VIZOR").separator("_"))
            .build()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        let mut config: Self = config
            .try_deserialize()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        // The two well-known Azure variables win over everything else.
        if let Ok(endpoint) = std::env::var("AZURE_VISION_ENDPOINT") {
            config.vision.endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("AZURE_VISION_KEY") {
            config.vision.key = key;
        }

        config.vision.endpoint = normalize_endpoint(&config.vision.endpoint);

        Ok(config)
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vizor")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

/// Strip trailing slashes from the endpoint so call sites can concatenate
/// paths blindly. Done once at load time.
pub fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim().trim_end_matches('/').to_string()
}
