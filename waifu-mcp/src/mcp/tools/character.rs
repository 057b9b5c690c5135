//! Character search MCP tool implementation.

use tokio_util::sync::CancellationToken;

use crate::tools::ToolError;

use super::super::{INVALID_PARAMS, McpError, McpState, TOOL_FAILED};
use super::content_result;

pub(super) async fn execute_search_anime_character(
    state: &McpState,
    arguments: &serde_json::Value,
    cancel: &CancellationToken,
) -> Result<serde_json::Value, McpError> {
    match state.character_tool.execute(arguments, cancel).await {
        Ok(content) => Ok(content_result(content)),
        Err(e) => Err(McpError {
            code: match &e {
                ToolError::InvalidName => INVALID_PARAMS,
                ToolError::Search(_) => TOOL_FAILED,
            },
            message: e.to_string(),
        }),
    }
}
