//! Configuration data structures for the vizor demo server.
//!
//! This module defines the schema for the application settings, including
//! server parameters, Azure AI Vision credentials, and logging options.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Azure AI Vision connection settings.
    #[serde(default)]
    pub vision: VisionConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the Axum server.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for the Azure AI Vision service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Base URL of the Azure AI Vision resource, e.g.
    /// `https://my-resource.cognitiveservices.azure.com`.
    /// Sourced from `AZURE_VISION_ENDPOINT`; trailing slashes are stripped
    /// once at load time.
    #[serde(default)]
    pub endpoint: String,

    /// Subscription key for the resource, sourced from `AZURE_VISION_KEY`.
    /// Sent as the `Ocp-Apim-Subscription-Key` header.
    #[serde(default)]
    pub key: String,

    /// Image Analysis API version.
    /// Default: `2024-02-01`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout for analysis calls, in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl VisionConfig {
    /// Whether both the endpoint and the key are present and non-empty.
    ///
    /// Missing credentials are not an error; the UI degrades to a
    /// "not connected" state and no network call is ever attempted.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.key.is_empty()
    }
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            key: String::new(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
