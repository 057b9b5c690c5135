//! `search_anime_character` tool execution.
//!
//! Validates the `name` argument, delegates to a [`CharacterSearch`] and
//! renders the match as three text segments.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::bangumi::{BangumiError, Character, CharacterSearch};

/// Argument key holding the character name
pub const NAME_ARGUMENT: &str = "name";

/// Tool execution errors
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid name")]
    InvalidName,

    #[error("failed to search character: {0}")]
    Search(#[from] BangumiError),
}

/// One block of tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        ToolContent::Text { text: text.into() }
    }
}

/// Handler for the character search tool
#[derive(Clone)]
pub struct SearchCharacterTool {
    search: Arc<dyn CharacterSearch>,
}

impl SearchCharacterTool {
    pub fn new(search: Arc<dyn CharacterSearch>) -> Self {
        Self { search }
    }

    /// Execute a search from raw tool-call arguments.
    ///
    /// Returns [`ToolError::InvalidName`] without touching the network when
    /// `name` is missing, not a string, or empty.
    pub async fn execute(
        &self,
        arguments: &serde_json::Value,
        cancel: &CancellationToken,
    ) -> Result<Vec<ToolContent>, ToolError> {
        let name = arguments
            .get(NAME_ARGUMENT)
            .and_then(|v| v.as_str())
            .filter(|name| !name.is_empty())
            .ok_or(ToolError::InvalidName)?;

        info!(name = %name, "Searching anime character");

        let character = self
            .search
            .search_character(name, cancel)
            .await
            .inspect_err(|e| error!(error = %e, name = %name, "Character search failed"))?;

        Ok(format_character(&character))
    }
}

/// Render a character as name, description and bare image URL, in that order.
pub fn format_character(character: &Character) -> Vec<ToolContent> {
    vec![
        ToolContent::text(format!("Character: {}", character.name)),
        ToolContent::text(format!("Description: {}", character.description)),
        ToolContent::text(character.image_url.clone()),
    ]
}
