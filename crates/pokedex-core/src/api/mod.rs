//! PokéAPI client with per-resource memoization.
//!
//! Provides the typed operations the UI layer consumes:
//! - Paginated listing
//! - Detail, species, evolution chain and encounter lookups
//! - Two-phase search (exact lookup, then catalog substring filter)
//! - Bounded-concurrency batch detail fetches
//!
//! # Module Organization
//!
//! - [`builder`] - Client construction options
//! - [`resources`] - Single-resource lookups and the paginated listing
//! - [`search`] - Catalog caching and fallback search
//! - [`batch`] - Batch detail fetches

mod batch;
mod builder;
mod resources;
mod search;

pub use builder::PokeApiClientBuilder;

use crate::cache::{CacheStats, MemoCache, ResourceKind};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{EvolutionChain, LocationArea, PokemonDetail, PokemonSpecies, PokemonSummary};
use crate::network::HttpClient;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Client for the PokéAPI REST service.
///
/// Each instance owns its caches, so two clients never share state. Wrap it
/// in an `Arc` to share one cache between tasks.
pub struct PokeApiClient {
    pub(super) http: HttpClient,
    pub(super) config: ClientConfig,
    pub(super) pokemon: MemoCache<Arc<PokemonDetail>>,
    pub(super) species: MemoCache<Arc<PokemonSpecies>>,
    pub(super) evolution: MemoCache<Arc<EvolutionChain>>,
    pub(super) encounters: MemoCache<Arc<Vec<LocationArea>>>,
    /// Full list of summaries, fetched at most once until cleared.
    pub(super) catalog: MemoCache<Arc<Vec<PokemonSummary>>>,
}

impl std::fmt::Debug for PokeApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeApiClient")
            .field("base_url", &self.http.base_url())
            .field("cached_pokemon", &self.pokemon.len())
            .field("has_catalog", &!self.catalog.is_empty())
            .finish()
    }
}

impl PokeApiClient {
    /// Create a client against the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        info!("PokéAPI client using {}", http.base_url());

        Ok(Self {
            http,
            config,
            pokemon: MemoCache::new(),
            species: MemoCache::new(),
            evolution: MemoCache::new(),
            encounters: MemoCache::new(),
            catalog: MemoCache::new(),
        })
    }

    /// Create a builder for more control over construction.
    pub fn builder() -> PokeApiClientBuilder {
        PokeApiClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Drop every cached resource, the catalog, and all pending registrations.
    pub fn clear_cache(&self) {
        self.pokemon.clear();
        self.species.clear();
        self.evolution.clear();
        self.encounters.clear();
        self.catalog.clear();
        info!("PokéAPI caches cleared");
    }

    /// Statistics for every resource cache.
    pub fn cache_stats(&self) -> HashMap<ResourceKind, CacheStats> {
        HashMap::from([
            (ResourceKind::Pokemon, self.pokemon.stats()),
            (ResourceKind::Species, self.species.stats()),
            (ResourceKind::EvolutionChain, self.evolution.stats()),
            (ResourceKind::Encounters, self.encounters.stats()),
            (ResourceKind::Catalog, self.catalog.stats()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_do_not_share_caches() {
        let a = PokeApiClient::new().unwrap();
        let b = PokeApiClient::new().unwrap();

        let detail: PokemonDetail = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "bulbasaur"
        }))
        .unwrap();
        a.cache_detail(Arc::new(detail));

        assert_eq!(a.cache_stats()[&ResourceKind::Pokemon].entries, 2);
        assert_eq!(b.cache_stats()[&ResourceKind::Pokemon].entries, 0);

        a.clear_cache();
        assert_eq!(a.cache_stats()[&ResourceKind::Pokemon].entries, 0);
    }

    #[test]
    fn test_debug_output() {
        let client = PokeApiClient::new().unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("https://pokeapi.co/api/v2"));
    }
}
