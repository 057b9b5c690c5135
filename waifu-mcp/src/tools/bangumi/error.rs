//! Error types for the Bangumi API.

#[derive(Debug, thiserror::Error)]
pub enum BangumiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("API request failed with status code: {status}")]
    Upstream { status: u16 },

    #[error("no character found with name: {name}")]
    NotFound { name: String },
}

/// Network-level failure underneath a [`BangumiError::Transport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for BangumiError {
    fn from(error: reqwest::Error) -> Self {
        BangumiError::Transport(TransportError::Http(error))
    }
}
