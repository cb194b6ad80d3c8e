//! Kashite Edge Gateway
//!
//! A small HTTP edge service built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                 EDGE GATEWAY                   │
//!                    │                                                │
//!   GET /api/test/*  │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│  proxy   │───▶│ upstream │──┼──▶ kashite.space
//!                    │  │ server  │    │ endpoint │    │  client  │  │    REST API
//!                    │  └─────────┘    └──────────┘    └──────────┘  │
//!                    │       │                                       │
//!   GET /*           │       ▼                                       │
//!   ─────────────────┼─▶┌─────────┐                                  │
//!                    │  │ assets  │  static bundle + index fallback  │
//!                    │  └─────────┘                                  │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │  config │ observability │ lifecycle      │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! Each proxied endpoint is a 1:1 forward of a GET request to the
//! configured upstream base URL; every other path resolves against the
//! static asset root with an index-document fallback for SPA routes.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use kashite_gateway::config::{self, GatewayConfig};
use kashite_gateway::http::HttpServer;
use kashite_gateway::lifecycle::{signals, Shutdown};
use kashite_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "kashite-gateway")]
#[command(about = "Edge gateway for the kashite front-end", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listener bind address (overrides config and environment).
    #[arg(long)]
    bind: Option<String>,

    /// Upstream API base URL (overrides config and environment).
    #[arg(long)]
    upstream_base: Option<String>,

    /// Static asset root directory (overrides config and environment).
    #[arg(long)]
    static_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // File < environment < flags
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    config::apply_env_overrides(&mut config);
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(base) = cli.upstream_base {
        config.upstream.base_url = base;
    }
    if let Some(root) = cli.static_root {
        config.static_assets.root = root;
    }
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;

    logging::init(&config.observability.log_level);

    tracing::info!("kashite-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_base = %config.upstream.base_url,
        static_root = %config.static_assets.root.display(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
