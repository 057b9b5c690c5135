use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

mod api;
mod config;
mod error;
mod mcp;
mod tools;

use crate::error::ServiceError;
use crate::mcp::McpState;
use crate::tools::{BangumiClient, SearchCharacterTool};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_logging();

    info!("Starting Waifu MCP v{}", env!("CARGO_PKG_VERSION"));

    let static_config = config::load_static_config()?;

    info!(
        host = %static_config.server.host,
        port = static_config.server.port,
        mcp_path = %static_config.mcp.path,
        "Configuration loaded"
    );

    // One client for the process lifetime; never reconfigured after this point
    let client = BangumiClient::new(
        &static_config.bangumi.base_url,
        &static_config.bangumi.user_agent,
    )
    .map_err(ServiceError::HttpClient)?;
    info!(base_url = %client.base_url(), "Bangumi client initialized");

    let mcp_state = Arc::new(McpState::new(SearchCharacterTool::new(Arc::new(client))));

    let app = api::router(mcp_state, &static_config.mcp.path);

    let addr = static_config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServiceError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let format = fmt::format()
        .with_target(true)
        .with_thread_ids(true)
        .compact();

    // Use RUST_LOG if set, otherwise default to info level for our crate
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("waifu_mcp=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().event_format(format))
        .with(filter)
        .init();
}
