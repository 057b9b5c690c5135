//! HTTP surface of the service.
//!
//! - `/health` for liveness checks
//! - the MCP endpoint, nested under the configured path

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::mcp::{McpState, mcp_router};

/// Application state
pub struct AppState {
    pub start_time: Instant,
}

/// Build the top-level router
pub fn router(mcp_state: Arc<McpState>, mcp_path: &str) -> Router {
    let state = Arc::new(AppState {
        start_time: Instant::now(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
        .nest(mcp_path, mcp_router(mcp_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
}
