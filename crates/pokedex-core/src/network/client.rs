//! Thin reqwest wrapper that speaks the PokéAPI error conventions.
//!
//! Every response is classified before decoding:
//! - 2xx decodes the JSON body
//! - 404 becomes [`PokedexError::NotFound`]
//! - any other status becomes [`PokedexError::Http`]
//! - transport failures become `Network` or `Timeout`

use crate::cache::ResourceKind;
use crate::config::ClientConfig;
use crate::{PokedexError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PokedexError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/pokemon/1`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the JSON body.
    ///
    /// `kind` and `identifier` only label the error when the API answers 404.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        kind: ResourceKind,
        identifier: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound {
                resource: kind.display_name().to_string(),
                identifier: identifier.to_string(),
            });
        }
        if !status.is_success() {
            return Err(PokedexError::Http {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<T>().await.map_err(|e| PokedexError::Json {
            message: format!("Failed to parse response from {}: {}", url, e),
        })
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> PokedexError {
        if err.is_timeout() {
            PokedexError::Timeout(self.timeout)
        } else {
            PokedexError::Network {
                message: format!("GET {} failed: {}", url, err),
                cause: std::error::Error::source(&err).map(|s| s.to_string()),
            }
        }
    }
}

/// Percent-encode one path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::new(&ClientConfig::new().with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client =
            HttpClient::new(&ClientConfig::new().with_base_url("https://example.com/api/v2/"))
                .unwrap();
        assert_eq!(client.url("/pokemon/1"), "https://example.com/api/v2/pokemon/1");
        assert_eq!(client.url("pokemon"), "https://example.com/api/v2/pokemon");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("mr-mime"), "mr-mime");
        assert_eq!(encode_segment("type: null"), "type%3A%20null");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(HttpClient::new(&ClientConfig::new().with_base_url("nope")).is_err());
    }

    #[tokio::test]
    async fn test_success_decodes_json_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 2 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body: Value = client
            .get_json("/pokemon", &[("limit", "2".to_string())], ResourceKind::Pokemon, "list")
            .await
            .unwrap();
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/9999999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Value>("/pokemon/9999999", &[], ResourceKind::Pokemon, "9999999")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PokedexError::NotFound {
                resource: "Pokémon".into(),
                identifier: "9999999".into()
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_maps_to_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Value>("/pokemon/1", &[], ResourceKind::Pokemon, "1")
            .await
            .unwrap_err();
        assert!(matches!(err, PokedexError::Http { status: 503, .. }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_bad_body_maps_to_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Value>("/pokemon/1", &[], ResourceKind::Pokemon, "1")
            .await
            .unwrap_err();
        assert!(matches!(err, PokedexError::Json { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_network() {
        let client =
            HttpClient::new(&ClientConfig::new().with_base_url("http://127.0.0.1:1")).unwrap();
        let err = client
            .get_json::<Value>("/pokemon/1", &[], ResourceKind::Pokemon, "1")
            .await
            .unwrap_err();
        assert!(matches!(err, PokedexError::Network { .. }));
    }
}
