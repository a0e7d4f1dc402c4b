//! noebs API Server
//!
//! HTTP boundary in front of the EBS payment switch.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! noebs-server
//!
//! # Start with custom config
//! noebs-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! NOEBS__SWITCH__BASE_URL=https://ebs.example.sd/consumer noebs-server
//!
//! # Print the OpenAPI document and exit
//! noebs-server --openapi
//! ```

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use noebs_api::openapi::openapi_json;
use noebs_api::{create_router, AppState, HttpSwitchClient};

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// noebs API Server - payment switch boundary
#[derive(Parser, Debug)]
#[command(name = "noebs-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "NOEBS_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "NOEBS_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "NOEBS_PORT")]
    port: Option<u16>,

    /// Switch base URL
    #[arg(long, env = "NOEBS_SWITCH_URL")]
    switch_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "NOEBS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "NOEBS_LOG_FORMAT")]
    log_format: Option<String>,

    /// Print the OpenAPI document and exit
    #[arg(long)]
    openapi: bool,
}

impl Args {
    /// Apply CLI overrides on top of loaded configuration
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.switch_url {
            config.switch.base_url = url;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.openapi {
        println!("{}", openapi_json()?);
        return Ok(());
    }

    let mut server_config = ServerConfig::load(args.config.as_deref())?;
    args.apply(&mut server_config);

    init_logging(&server_config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting noebs server");

    validate_config(&server_config)?;

    let switch = HttpSwitchClient::new(&server_config.switch_config())?;
    tracing::info!(
        switch_url = %server_config.switch.base_url,
        timeout_secs = server_config.switch.timeout_secs,
        "Switch client ready"
    );

    let state = Arc::new(AppState::new(Arc::new(switch)));
    tracing::info!(routes = state.catalogue.len(), "Routes registered");

    let app = create_router(state, server_config.api_config());

    if server_config.metrics.enabled {
        start_metrics_server(server_config.metrics_addr()?)?;
    }

    let addr = server_config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        host = %server_config.server.host,
        port = server_config.server.port,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => subscriber.with(fmt::layer().json().with_target(true)).try_init()?,
        _ => subscriber.with(fmt::layer().pretty().with_target(true)).try_init()?,
    }

    Ok(())
}

/// Validate configuration
fn validate_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.switch.base_url.trim().is_empty() {
        anyhow::bail!("Switch base URL is not set. Use --switch-url or NOEBS__SWITCH__BASE_URL.");
    }

    if config.switch.timeout_secs == 0 {
        anyhow::bail!("Switch timeout must be at least one second");
    }

    if config.metrics.enabled && config.metrics.port == config.server.port {
        anyhow::bail!("Metrics port {} clashes with the server port", config.metrics.port);
    }

    if !config.switch.base_url.starts_with("https://") {
        tracing::warn!(switch_url = %config.switch.base_url, "Switch connection is not TLS");
    }

    Ok(())
}

/// Start Prometheus metrics exporter
fn start_metrics_server(addr: SocketAddr) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics exporter started");
    Ok(())
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from([
            "noebs-server",
            "--port",
            "8081",
            "--switch-url",
            "https://ebs.example.sd/consumer",
        ]);
        assert_eq!(args.port, Some(8081));

        let mut config = ServerConfig::default();
        args.apply(&mut config);
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.switch.base_url, "https://ebs.example.sd/consumer");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_empty_switch_url() {
        let mut config = ServerConfig::default();
        config.switch.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = ServerConfig::default();
        config.switch.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_metrics_port_clash() {
        let mut config = ServerConfig::default();
        config.metrics.enabled = true;
        config.metrics.port = config.server.port;
        assert!(validate_config(&config).is_err());
    }
}
