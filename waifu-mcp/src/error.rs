use thiserror::Error;

/// Service startup error type
///
/// Tool-level failures live in [`crate::tools::ToolError`] and never reach
/// this type; they are reported to MCP clients as JSON-RPC errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to create HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error")]
    Serve(#[source] std::io::Error),
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
