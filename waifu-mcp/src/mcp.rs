//! MCP (Model Context Protocol) server over HTTP+SSE.
//!
//! `GET /` opens an SSE stream whose first event (`endpoint`) names the URL to
//! POST JSON-RPC messages to, including a session id. Replies to requests
//! posted with that session id are sent as `message` events on the stream and
//! the POST itself is answered with `202 Accepted`. A POST without a session
//! id gets its reply inline as the response body.

mod handlers;
mod session;
mod tools;

use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response, Sse, sse::Event},
    routing::{get, post},
};
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::tools::SearchCharacterTool;
pub use session::SessionManager;

pub(crate) const PROTOCOL_VERSION: &str = "2024-11-05";
pub(crate) const SERVER_NAME: &str = "Waifu MCP";
pub(crate) const SERVER_INSTRUCTIONS: &str =
    "Waifu MCP server. Use search_anime_character to look up an anime character on Bangumi by name.";

/// JSON-RPC error codes
pub(crate) const INVALID_PARAMS: i32 = -32602;
pub(crate) const METHOD_NOT_FOUND: i32 = -32601;
pub(crate) const TOOL_FAILED: i32 = -32000;

/// MCP server state
pub struct McpState {
    pub character_tool: SearchCharacterTool,
    pub sessions: Arc<SessionManager>,
}

impl McpState {
    pub fn new(character_tool: SearchCharacterTool) -> Self {
        Self {
            character_tool,
            sessions: Arc::new(SessionManager::new()),
        }
    }
}

/// Build the MCP router
pub fn mcp_router(state: Arc<McpState>) -> Router {
    Router::new()
        .route("/", get(mcp_sse_handler))
        .route("/messages", post(mcp_message_handler))
        .with_state(state)
}

/// MCP SSE handler - opens a session and announces its message endpoint
async fn mcp_sse_handler(
    State(state): State<Arc<McpState>>,
    OriginalUri(uri): OriginalUri,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (guard, receiver) = state.sessions.open();
    let endpoint = format!(
        "{}/messages?sessionId={}",
        uri.path().trim_end_matches('/'),
        guard.id()
    );
    info!(session_id = %guard.id(), "MCP client connected");

    let endpoint_event =
        stream::once(async move { Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint)) });

    // The guard rides along with the stream; dropping the stream closes the session
    let messages = stream::unfold((receiver, guard), |(mut receiver, guard)| async move {
        let message = receiver.recv().await?;
        Some((
            Ok::<_, Infallible>(Event::default().event("message").data(message)),
            (receiver, guard),
        ))
    });

    Sse::new(endpoint_event.chain(messages)).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// MCP message handler - handles JSON-RPC style requests
async fn mcp_message_handler(
    State(state): State<Arc<McpState>>,
    Query(query): Query<MessageQuery>,
    Json(request): Json<McpRequest>,
) -> Response {
    let Some(id) = request.id else {
        // Notifications never get a reply
        debug!(method = %request.method, "MCP notification received");
        return StatusCode::ACCEPTED.into_response();
    };

    let Some(session_id) = query.session_id else {
        // Dropping the request future (client went away) cancels any in-flight upstream call
        let cancel = CancellationToken::new();
        let _guard = cancel.clone().drop_guard();
        let response = dispatch(&state, id, &request.method, request.params, &cancel).await;
        return Json(response).into_response();
    };

    // Closing the SSE stream also cancels the request
    let Some(cancel) = state.sessions.request_token(&session_id) else {
        warn!(session_id = %session_id, "Message for unknown MCP session");
        return (StatusCode::NOT_FOUND, "Unknown session").into_response();
    };
    let _guard = cancel.clone().drop_guard();

    let response = dispatch(&state, id, &request.method, request.params, &cancel).await;
    let message = serde_json::to_string(&response).unwrap_or_default();

    if state.sessions.send(&session_id, message) {
        StatusCode::ACCEPTED.into_response()
    } else {
        warn!(session_id = %session_id, "MCP session closed before reply");
        (StatusCode::NOT_FOUND, "Unknown session").into_response()
    }
}

async fn dispatch(
    state: &McpState,
    id: serde_json::Value,
    method: &str,
    params: Option<serde_json::Value>,
    cancel: &CancellationToken,
) -> McpResponse {
    debug!(method = %method, "MCP request received");

    let result = match method {
        "initialize" => handlers::handle_initialize(state).await,
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => handlers::handle_tools_list(state).await,
        "tools/call" => tools::handle_tool_call(state, params, cancel).await,
        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {method}"),
        }),
    };

    match result {
        Ok(data) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(data),
            error: None,
        },
        Err(error) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        },
    }
}

// MCP Protocol Types

#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    /// Absent on notifications
    #[serde(default)]
    id: Option<serde_json::Value>,
    method: String,
    #[serde(default)]
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct McpError {
    code: i32,
    message: String,
}
