//! Bangumi API integration.
//!
//! Character search against the Bangumi metadata service
//! (https://api.bgm.tv). Only the first search candidate is ever used.

mod client;
mod error;
mod responses;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub use client::{BangumiClient, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{BangumiError, TransportError};
pub use responses::Character;

/// Character lookup by name.
///
/// Implemented by [`BangumiClient`]; tool handlers hold it as a trait object
/// so tests can substitute a stub.
#[async_trait]
pub trait CharacterSearch: Send + Sync {
    /// Look up the best match for `name`.
    ///
    /// Cancelling `cancel` aborts the request and yields
    /// [`TransportError::Cancelled`].
    async fn search_character(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Character, BangumiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_USER_AGENT: &str = "waifu-mcp-test/1.0";

    fn make_client(url: &str) -> BangumiClient {
        BangumiClient::new(url, TEST_USER_AGENT).unwrap()
    }

    fn asuka_response() -> serde_json::Value {
        serde_json::json!({
            "data": [{
                "id": 3525,
                "name": "Asuka Langley Soryu",
                "summary": "Pilot of Evangelion Unit-02.",
                "gender": "female",
                "birth_year": 2001,
                "birth_mon": 12,
                "birth_day": 4,
                "blood_type": 1,
                "images": {
                    "small": "https://lain.bgm.tv/pic/crt/s/asuka.jpg",
                    "grid": "https://lain.bgm.tv/pic/crt/g/asuka.jpg",
                    "large": "https://lain.bgm.tv/pic/crt/l/asuka.jpg",
                    "medium": "https://lain.bgm.tv/pic/crt/m/asuka.jpg"
                },
                "stat": { "comments": 120, "collects": 4000 },
                "locked": false,
                "type": 1,
                "infobox": [
                    { "key": "简体中文名", "value": "明日香" },
                    { "key": "别名", "value": [{ "k": "英文名", "v": "Asuka" }] }
                ],
                "nsfw": false
            }],
            "total": 1,
            "limit": 1,
            "offset": 0
        })
    }

    #[test]
    fn test_strips_trailing_slash() {
        let client = make_client("https://api.bgm.tv/");
        assert_eq!(client.base_url(), "https://api.bgm.tv");
    }

    #[tokio::test]
    async fn test_search_returns_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/search/characters"))
            .and(query_param("limit", "1"))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", TEST_USER_AGENT))
            .and(body_json(serde_json::json!({ "keyword": "Asuka" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(asuka_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let character = client
            .search_character("Asuka", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            character,
            Character {
                name: "Asuka Langley Soryu".to_string(),
                description: "Pilot of Evangelion Unit-02.".to_string(),
                image_url: "https://lain.bgm.tv/pic/crt/l/asuka.jpg".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_search_tolerates_sparse_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/search/characters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "id": 1, "name": "Rei" }],
                "total": 1,
                "limit": 1,
                "offset": 0
            })))
            .mount(&server)
            .await;

        let character = make_client(&server.uri())
            .search_character("Rei", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(character.name, "Rei");
        assert_eq!(character.description, "");
        assert_eq!(character.image_url, "");
    }

    #[tokio::test]
    async fn test_search_treats_null_fields_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/search/characters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "id": 1,
                    "name": "Rei",
                    "summary": null,
                    "gender": null,
                    "images": null,
                    "stat": null,
                    "locked": null,
                    "type": null,
                    "infobox": null,
                    "nsfw": null
                }],
                "total": null,
                "limit": 1,
                "offset": 0
            })))
            .mount(&server)
            .await;

        let character = make_client(&server.uri())
            .search_character("Rei", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            character,
            Character {
                name: "Rei".to_string(),
                description: String::new(),
                image_url: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_search_tolerates_null_image_variants() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "id": 1,
                    "name": "Rei",
                    "summary": "s",
                    "images": { "small": null, "grid": null, "large": "http://x/l.png", "medium": null },
                    "infobox": [{ "key": "别名", "value": null }]
                }]
            })))
            .mount(&server)
            .await;

        let character = make_client(&server.uri())
            .search_character("Rei", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(character.description, "s");
        assert_eq!(character.image_url, "http://x/l.png");
    }

    #[tokio::test]
    async fn test_non_200_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/search/characters"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let err = make_client(&server.uri())
            .search_character("Asuka", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BangumiError::Upstream { status: 500 }));
        assert_eq!(
            err.to_string(),
            "API request failed with status code: 500"
        );
    }

    #[tokio::test]
    async fn test_other_success_codes_are_upstream_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202).set_body_json(asuka_response()))
            .mount(&server)
            .await;

        let err = make_client(&server.uri())
            .search_character("Asuka", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BangumiError::Upstream { status: 202 }));
    }

    #[tokio::test]
    async fn test_empty_data_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/search/characters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [],
                "total": 0,
                "limit": 1,
                "offset": 0
            })))
            .mount(&server)
            .await;

        let err = make_client(&server.uri())
            .search_character("Nobody", &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            BangumiError::NotFound { name } => assert_eq!(name, "Nobody"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = make_client(&server.uri())
            .search_character("Asuka", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BangumiError::Transport(TransportError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asuka_response()))
            .expect(0)
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = make_client(&server.uri())
            .search_character("Asuka", &cancel)
            .await;

        assert!(matches!(
            result,
            Err(BangumiError::Transport(TransportError::Cancelled))
        ));
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(asuka_response())
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let client = make_client(&server.uri());
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.search_character("Asuka", &cancel),
        )
        .await
        .expect("cancellation should abort before the stub responds");

        assert!(matches!(
            result,
            Err(BangumiError::Transport(TransportError::Cancelled))
        ));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on the discard port
        let client = make_client("http://127.0.0.1:9");
        let err = client
            .search_character("Asuka", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BangumiError::Transport(TransportError::Http(_))
        ));
        assert!(err.to_string().starts_with("HTTP request failed: "));
    }

    #[tokio::test]
    async fn test_repeated_searches_are_identical() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asuka_response()))
            .expect(2)
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let cancel = CancellationToken::new();
        let first = client.search_character("Asuka", &cancel).await.unwrap();
        let second = client.search_character("Asuka", &cancel).await.unwrap();

        assert_eq!(first, second);
    }
}
