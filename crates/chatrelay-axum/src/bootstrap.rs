//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the completion gateway is
//! instantiated and wired to the router.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chatrelay_core::{CompletionPort, RelayConfig};
use chatrelay_provider::CompletionGateway;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Derive CORS from the relay's configured origin.
    #[must_use]
    pub fn from_relay(config: &RelayConfig) -> Self {
        match config.origin.as_deref() {
            Some(origin) if !config.allows_any_origin() => {
                Self::AllowOrigins(vec![origin.trim_end_matches('/').to_string()])
            }
            _ => Self::AllowAll,
        }
    }
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Optional path to the static front-end.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Set the static directory for front-end serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }
}

/// Application context for the Axum adapter.
pub struct AppContext {
    /// Immutable relay configuration.
    pub config: Arc<RelayConfig>,
    /// Outbound completion port.
    pub completions: Arc<dyn CompletionPort>,
}

impl AppContext {
    /// Assemble a context from already-built parts.
    pub fn new(config: RelayConfig, completions: Arc<dyn CompletionPort>) -> Self {
        Self {
            config: Arc::new(config),
            completions,
        }
    }
}

/// Validate the configuration and build the completion gateway.
pub fn bootstrap(config: RelayConfig) -> Result<AppContext> {
    config.validate().context("invalid relay configuration")?;

    let gateway =
        CompletionGateway::from_config(&config).context("failed to build HTTP client")?;

    info!(
        target: "chatrelay.config",
        model = %config.model,
        endpoint = %config.endpoint,
        key = %config.api_key.redacted(),
        origin = ?config.origin,
        timeout_secs = config.timeout.as_secs(),
        "Relay configured"
    );

    Ok(AppContext::new(config, Arc::new(gateway)))
}

/// Start the web server and run until Ctrl-C.
pub async fn start_server(relay: RelayConfig, server: ServerConfig) -> Result<()> {
    let ctx = bootstrap(relay)?;

    if let Some(ref dir) = server.static_dir {
        if dir.join("index.html").is_file() {
            info!("Serving static assets from: {}", dir.display());
        } else {
            warn!("No index.html in static directory: {}", dir.display());
        }
    }

    let app = crate::routes::create_router(ctx, server.static_dir.as_deref());

    let addr = format!("{}:{}", server.host, server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local: SocketAddr = listener.local_addr()?;

    info!("chatrelay listening on http://{local}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chatrelay shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
