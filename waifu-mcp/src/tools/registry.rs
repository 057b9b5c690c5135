//! Tool registry for the MCP server.
//!
//! Tool names are derived from enum variants via strum, so the name used in
//! `tools/list` and the name dispatched by `tools/call` cannot drift apart.

use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::character::NAME_ARGUMENT;

/// All tool names as an exhaustive enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    SearchAnimeCharacter,
}

impl ToolName {
    fn metadata(self) -> ToolMetadata {
        match self {
            ToolName::SearchAnimeCharacter => ToolMetadata {
                name: self,
                description: "Search anime character by name",
                parameters: search_anime_character_parameters,
            },
        }
    }
}

/// Metadata for a tool definition.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    pub name: ToolName,

    pub description: &'static str,

    /// JSON Schema for tool parameters
    pub parameters: fn() -> serde_json::Value,
}

/// Central registry of all tools.
pub struct ToolRegistry {
    tools: Vec<ToolMetadata>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: ToolName::iter().map(ToolName::metadata).collect(),
        }
    }

    /// Get all tools as MCP tool definitions
    pub fn mcp_definitions(&self) -> Vec<McpToolDefinition> {
        self.tools
            .iter()
            .map(|t| McpToolDefinition {
                name: t.name.to_string(),
                description: t.description.to_string(),
                input_schema: (t.parameters)(),
            })
            .collect()
    }

    /// Get metadata by string name
    pub fn get_by_str(&self, name: &str) -> Option<&ToolMetadata> {
        let name = ToolName::from_str(name).ok()?;
        self.tools.iter().find(|t| t.name == name)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global singleton registry instance
pub static REGISTRY: LazyLock<ToolRegistry> = LazyLock::new(ToolRegistry::new);

/// MCP tool definition structure (for `tools/list` output)
#[derive(Debug, Clone, Serialize)]
pub struct McpToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

fn search_anime_character_parameters() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            NAME_ARGUMENT: {
                "type": "string",
                "description": "Name of the character to search"
            }
        },
        "required": [NAME_ARGUMENT]
    })
}
