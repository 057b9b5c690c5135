//! Tools exposed to MCP clients.
//!
//! - `bangumi`: Bangumi API client and response types
//! - `character`: `search_anime_character` argument handling and output
//! - `registry`: tool names and schemas

pub mod bangumi;
pub mod character;
pub mod registry;

pub use bangumi::BangumiClient;
pub use character::{SearchCharacterTool, ToolContent, ToolError};
pub use registry::{REGISTRY, ToolName};
