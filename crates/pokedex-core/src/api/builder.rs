//! Builder for configuring [`PokeApiClient`] construction.

use super::PokeApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use std::time::Duration;

/// Builder for [`PokeApiClient`].
///
/// # Example
///
/// ```rust,ignore
/// use pokedex_core::PokeApiClient;
///
/// let client = PokeApiClient::builder()
///     .base_url("http://localhost:8000/api/v2")
///     .request_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PokeApiClientBuilder {
    config: ClientConfig,
}

impl PokeApiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// API base URL.
    ///
    /// Default: `https://pokeapi.co/api/v2`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Per-request timeout.
    ///
    /// Default: 15 seconds
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_request_timeout(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    /// Cap on results returned by the catalog fallback search.
    ///
    /// Default: 50
    pub fn search_max_results(mut self, max_results: usize) -> Self {
        self.config = self.config.with_search_max_results(max_results);
        self
    }

    /// Number of concurrent workers for batch detail fetches.
    ///
    /// Default: 6
    pub fn batch_concurrency(mut self, concurrency: usize) -> Self {
        self.config = self.config.with_batch_concurrency(concurrency);
        self
    }

    pub fn default_page_size(mut self, page_size: u32) -> Self {
        self.config = self.config.with_default_page_size(page_size);
        self
    }

    /// Build the client. Fails if the configuration is invalid.
    pub fn build(self) -> Result<PokeApiClient> {
        PokeApiClient::with_config(self.config)
    }
}
