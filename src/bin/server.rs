//! OMS HTTP Server Binary
//!
//! This is the main entry point for the order execution REST API server.
//! It initializes the in-memory order store, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin oms-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 80)
//! - `EXECUTION_DELAY_MIN_MS`: Minimum simulated execution delay (default: 100)
//! - `EXECUTION_DELAY_MAX_MS`: Maximum simulated execution delay (default: 1000)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use oms_rust::config::ServerConfig;
use oms_rust::db::LocalRepository;
use oms_rust::http::{create_router, AppState};
use oms_rust::services::OrderEvents;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting OMS HTTP Server");

    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Create application state: in-memory store plus the live update hub
    let repository = Arc::new(LocalRepository::new());
    let events = OrderEvents::new();
    let state = AppState::new(repository, events, config.execution);

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);
    info!("Live updates available at ws://{}/ws", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
