//! MCP tool call handler.
//!
//! Handles execution of individual tool calls from MCP clients.

mod character;

use tokio_util::sync::CancellationToken;

use crate::tools::{REGISTRY, ToolContent, ToolName};

use super::{INVALID_PARAMS, METHOD_NOT_FOUND, McpError, McpState};

/// Handle tools/call request
pub async fn handle_tool_call(
    state: &McpState,
    params: Option<serde_json::Value>,
    cancel: &CancellationToken,
) -> Result<serde_json::Value, McpError> {
    let params = params.ok_or_else(|| McpError {
        code: INVALID_PARAMS,
        message: "Missing params".to_string(),
    })?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError {
            code: INVALID_PARAMS,
            message: "Missing tool name".to_string(),
        })?;

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    let tool = REGISTRY.get_by_str(name).ok_or_else(|| McpError {
        code: METHOD_NOT_FOUND,
        message: format!("Unknown tool: {}", name),
    })?;

    match tool.name {
        ToolName::SearchAnimeCharacter => {
            character::execute_search_anime_character(state, &arguments, cancel).await
        }
    }
}

/// Wrap tool output as an MCP `tools/call` result
fn content_result(content: Vec<ToolContent>) -> serde_json::Value {
    serde_json::json!({ "content": content })
}
