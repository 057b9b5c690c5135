//! Startup configuration.
//! These settings affect server binding or the upstream client and require restart to change.

use serde::Deserialize;

use crate::tools::bangumi::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

/// Startup configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StaticConfig {
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    #[serde(default = "default_mcp")]
    pub mcp: McpConfig,

    #[serde(default = "default_bangumi")]
    pub bangumi: BangumiConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MCP endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct McpConfig {
    /// Path the MCP router is nested under
    #[serde(default = "default_mcp_path")]
    pub path: String,
}

/// Bangumi API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BangumiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent on every request. The API refuses anonymous clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// ==================== Default Value Functions ====================

pub(crate) fn default_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: default_port(),
    }
}

pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

pub(crate) fn default_mcp() -> McpConfig {
    McpConfig {
        path: default_mcp_path(),
    }
}

pub(crate) fn default_mcp_path() -> String {
    "/mcp".to_string()
}

pub(crate) fn default_bangumi() -> BangumiConfig {
    BangumiConfig {
        base_url: default_base_url(),
        user_agent: default_user_agent(),
    }
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
