//! chatrelay entry point - the composition root.
//!
//! Loads `.env`, installs logging, reads the relay configuration from the
//! environment and serves until Ctrl-C.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatrelay_axum::bootstrap::DEFAULT_PORT;
use chatrelay_axum::{ServerConfig, start_server};
use chatrelay_core::RelayConfig;

/// Minimal chat relay in front of an OpenRouter-compatible completion API.
#[derive(Debug, Parser)]
#[command(name = "chatrelay", version, about)]
struct Cli {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory containing the front-end (`index.html`).
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let relay = RelayConfig::from_env().context("invalid relay configuration")?;
    let server = ServerConfig {
        host: cli.host,
        port: cli.port,
        static_dir: cli.static_dir,
    };

    start_server(relay, server).await
}
