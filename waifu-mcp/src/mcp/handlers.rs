//! MCP message handlers.
//!
//! Handlers for initialize and tools/list requests.

use crate::tools::REGISTRY;

use super::{McpError, McpState, PROTOCOL_VERSION, SERVER_INSTRUCTIONS, SERVER_NAME};

/// Handle initialize request
pub async fn handle_initialize(_state: &McpState) -> Result<serde_json::Value, McpError> {
    Ok(serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": SERVER_INSTRUCTIONS
    }))
}

/// Handle tools/list request
pub async fn handle_tools_list(_state: &McpState) -> Result<serde_json::Value, McpError> {
    let tools = REGISTRY.mcp_definitions();

    Ok(serde_json::json!({ "tools": tools }))
}
