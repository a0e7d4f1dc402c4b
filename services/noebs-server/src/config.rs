//! Server Configuration
//!
//! Configuration management for the noebs API server.
//! Supports environment variables, config files, and CLI arguments.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use noebs_api::{ApiConfig, SwitchConfig};

/// Environment variable prefix, e.g. `NOEBS__SWITCH__BASE_URL`
pub const ENV_PREFIX: &str = "NOEBS";

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Backend switch connection
    #[serde(default)]
    pub switch: SwitchSettings,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server binding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address {}:{}: {}", self.host, self.port, e))
    }
}

/// Switch connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchSettings {
    /// Base URL; operation names are appended to it
    #[serde(default = "default_switch_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_switch_timeout")]
    pub timeout_secs: u64,
}

impl Default for SwitchSettings {
    fn default() -> Self {
        Self {
            base_url: default_switch_url(),
            timeout_secs: default_switch_timeout(),
        }
    }
}

impl From<&SwitchSettings> for SwitchConfig {
    fn from(settings: &SwitchSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable response compression
    #[serde(default = "default_true")]
    pub enable_compression: bool,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: default_cors_origins(),
            enable_compression: true,
            enable_tracing: true,
            max_body_size: default_max_body_size(),
        }
    }
}

impl From<&ApiSettings> for ApiConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            enable_cors: settings.enable_cors,
            cors_origins: settings.cors_origins.clone(),
            enable_compression: settings.enable_compression,
            enable_tracing: settings.enable_tracing,
            max_body_size: settings.max_body_size,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable the Prometheus exporter
    #[serde(default)]
    pub enabled: bool,

    /// Exporter port (separate from main server)
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_switch_url() -> String {
    "http://localhost:8888/QAConsumer".to_string()
}

fn default_switch_timeout() -> u64 {
    30
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_body_size() -> usize {
    64 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Switch connection settings for the client
    pub fn switch_config(&self) -> SwitchConfig {
        SwitchConfig::from(&self.switch)
    }

    /// Router settings
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::from(&self.api)
    }

    /// Prometheus exporter address: the server host on the metrics port
    pub fn metrics_addr(&self) -> anyhow::Result<SocketAddr> {
        ServerSettings {
            host: self.server.host.clone(),
            port: self.metrics.port,
        }
        .socket_addr()
    }
}
