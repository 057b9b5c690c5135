//! Bangumi API client implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::CharacterSearch;
use super::error::{BangumiError, TransportError};
use super::responses::{Character, SearchCharacterResponse};

/// Default base URL for the Bangumi API
pub const DEFAULT_BASE_URL: &str = "https://api.bgm.tv";

/// The API rejects requests that don't identify as a known client.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

#[derive(Debug, Serialize)]
struct SearchCharacterRequest<'a> {
    keyword: &'a str,
}

/// Bangumi API client
///
/// Holds an immutable `reqwest::Client`; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct BangumiClient {
    client: Client,
    base_url: String,
}

impl BangumiClient {
    /// Create a new Bangumi client
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        // limit=1: only the best match is ever used
        format!("{}/v0/search/characters?limit=1", self.base_url)
    }
}

#[async_trait]
impl CharacterSearch for BangumiClient {
    async fn search_character(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Character, BangumiError> {
        let url = self.search_url();
        debug!(url = %url, name = %name, "Sending character search request");

        let request = self
            .client
            .post(&url)
            .json(&SearchCharacterRequest { keyword: name })
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::Cancelled.into()),
            response = request => response?,
        };

        if response.status() != StatusCode::OK {
            return Err(BangumiError::Upstream {
                status: response.status().as_u16(),
            });
        }

        let results = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::Cancelled.into()),
            results = response.json::<SearchCharacterResponse>() => results?,
        };

        let character = results
            .data
            .into_iter()
            .next()
            .map(Character::from)
            .ok_or_else(|| BangumiError::NotFound {
                name: name.to_string(),
            })?;

        info!(
            name = %character.name,
            image_url = %character.image_url,
            "Found character"
        );
        Ok(character)
    }
}
