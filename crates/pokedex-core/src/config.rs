//! Centralized configuration for the Pokédex client.
//!
//! Constants describe the remote API and the defaults used by the client;
//! [`ClientConfig`] carries the values a single client instance runs with.

use crate::error::{PokedexError, Result};
use std::time::Duration;

/// Remote API defaults.
pub struct PokeApiConfig;

impl PokeApiConfig {
    pub const API_BASE: &'static str = "https://pokeapi.co/api/v2";
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    pub const SEARCH_MAX_RESULTS: usize = 50;
    pub const BATCH_CONCURRENCY: usize = 6;
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const USER_AGENT: &'static str = "pokedex-core/0.1";
}

/// Runtime configuration for a [`crate::PokeApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,
    /// Total timeout applied to each request.
    pub request_timeout: Duration,
    pub user_agent: String,
    /// Page size used by the session facade when none is given.
    pub default_page_size: u32,
    /// Cap on fallback search results.
    pub search_max_results: usize,
    /// Worker count for batch detail fetches.
    pub batch_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: PokeApiConfig::API_BASE.to_string(),
            request_timeout: NetworkConfig::REQUEST_TIMEOUT,
            user_agent: NetworkConfig::USER_AGENT.to_string(),
            default_page_size: PokeApiConfig::DEFAULT_PAGE_SIZE,
            search_max_results: PokeApiConfig::SEARCH_MAX_RESULTS,
            batch_concurrency: PokeApiConfig::BATCH_CONCURRENCY,
        }
    }
}

impl ClientConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn with_search_max_results(mut self, max_results: usize) -> Self {
        self.search_max_results = max_results;
        self
    }

    pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency;
        self
    }

    /// Check that the configuration can build a working client.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| PokedexError::Config {
            message: format!("Invalid base URL {:?}: {}", self.base_url, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PokedexError::Config {
                message: format!("Unsupported URL scheme: {}", parsed.scheme()),
            });
        }
        if self.default_page_size == 0 {
            return Err(PokedexError::Config {
                message: "Default page size must be positive".to_string(),
            });
        }
        if self.batch_concurrency == 0 {
            return Err(PokedexError::Config {
                message: "Batch concurrency must be positive".to_string(),
            });
        }
        Ok(())
    }
}
