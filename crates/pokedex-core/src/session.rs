//! Stateful facade over [`PokeApiClient`] for UI-style consumers.
//!
//! [`Pokedex`] never returns an error. Each operation catches failures,
//! records the most recent one in an error slot, and hands back a safe
//! fallback: `None`, an empty list, or the last list that loaded
//! successfully. Callers inspect [`Pokedex::error`] to detect failure.

use crate::api::PokeApiClient;
use crate::error::PokedexError;
use crate::models::{
    CompletePokemon, EvolutionChain, Identifier, LocationArea, PokemonDetail,
    PokemonListResponse, PokemonSpecies, PokemonSummary,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Slots {
    pokemons: Vec<PokemonSummary>,
    pokemon: Option<Arc<PokemonDetail>>,
    error: Option<PokedexError>,
    page: u32,
    page_size: u32,
    total: u32,
    active_loads: usize,
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub pokemons: Vec<PokemonSummary>,
    pub pokemon: Option<Arc<PokemonDetail>>,
    pub loading: bool,
    pub error: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
}

/// Session state plus the client it reads through.
#[derive(Debug)]
pub struct Pokedex {
    client: Arc<PokeApiClient>,
    slots: RwLock<Slots>,
}

impl Pokedex {
    pub fn new(client: Arc<PokeApiClient>) -> Self {
        let page_size = client.config().default_page_size;
        Self {
            client,
            slots: RwLock::new(Slots {
                page: 1,
                page_size,
                ..Slots::default()
            }),
        }
    }

    pub fn client(&self) -> &Arc<PokeApiClient> {
        &self.client
    }

    // ========================================
    // Operations
    // ========================================

    /// Load one page of the catalog.
    ///
    /// `None` reuses the current page or page size. On failure the previous
    /// results are kept and returned with `next`/`previous` cleared.
    pub async fn list(&self, page: Option<u32>, page_size: Option<u32>) -> PokemonListResponse {
        let (page, page_size) = {
            let slots = self.slots.read().await;
            (page.unwrap_or(slots.page), page_size.unwrap_or(slots.page_size))
        };

        self.begin().await;
        let result = self.client.list_page(page, page_size).await;
        let mut slots = self.slots.write().await;
        slots.active_loads = slots.active_loads.saturating_sub(1);

        match result {
            Ok(response) => {
                slots.pokemons = response.results.clone();
                slots.total = response.count;
                slots.page = page;
                slots.page_size = page_size;
                response
            }
            Err(e) => {
                warn!("Listing page {} failed, keeping previous results: {}", page, e);
                slots.error = Some(e);
                PokemonListResponse {
                    count: slots.total,
                    next: None,
                    previous: None,
                    results: slots.pokemons.clone(),
                }
            }
        }
    }

    /// Load the page after the current one.
    pub async fn next_page(&self) -> PokemonListResponse {
        let page = self.slots.read().await.page.saturating_add(1);
        self.list(Some(page), None).await
    }

    /// Load the page before the current one, staying on page 1.
    pub async fn previous_page(&self) -> PokemonListResponse {
        let page = self.slots.read().await.page.saturating_sub(1).max(1);
        self.list(Some(page), None).await
    }

    /// Look up one Pokémon and make it the current one.
    ///
    /// Returns `None` on failure; a 404 leaves [`PokedexError::NotFound`]
    /// in the error slot.
    pub async fn get(&self, identifier: impl Into<Identifier>) -> Option<Arc<PokemonDetail>> {
        self.clear_error().await;
        let result = self.client.pokemon(identifier).await;
        let mut slots = self.slots.write().await;
        match result {
            Ok(detail) => {
                slots.pokemon = Some(detail.clone());
                Some(detail)
            }
            Err(e) => {
                debug!("Lookup failed: {}", e);
                slots.pokemon = None;
                slots.error = Some(e);
                None
            }
        }
    }

    pub async fn species(&self, identifier: impl Into<Identifier>) -> Option<Arc<PokemonSpecies>> {
        self.clear_error().await;
        let result = self.client.species(identifier).await;
        self.record(result).await
    }

    pub async fn evolution_chain(&self, chain_id: u32) -> Option<Arc<EvolutionChain>> {
        self.clear_error().await;
        let result = self.client.evolution_chain(chain_id).await;
        self.record(result).await
    }

    /// Encounter locations, or an empty list on failure.
    pub async fn locations(&self, identifier: impl Into<Identifier>) -> Arc<Vec<LocationArea>> {
        self.clear_error().await;
        let result = self.client.encounters(identifier).await;
        self.record(result).await.unwrap_or_default()
    }

    /// Search by id, name, or name substring.
    ///
    /// `None` uses the configured result cap. A blank query returns an
    /// empty list and is not recorded as an error.
    pub async fn search(&self, query: &str, max_results: Option<usize>) -> Vec<PokemonSummary> {
        let max_results = max_results.unwrap_or(self.client.config().search_max_results);

        self.begin().await;
        let result = self.client.search(query, max_results).await;
        let mut slots = self.slots.write().await;
        slots.active_loads = slots.active_loads.saturating_sub(1);

        match result {
            Ok(matches) => {
                slots.pokemons = matches.clone();
                slots.total = matches.len() as u32;
                matches
            }
            Err(PokedexError::EmptyQuery) => Vec::new(),
            Err(e) => {
                warn!("Search for '{}' failed: {}", query.trim(), e);
                slots.error = Some(e);
                Vec::new()
            }
        }
    }

    /// Detail, species, evolution chain and encounters in one call.
    pub async fn complete(&self, identifier: impl Into<Identifier>) -> Option<CompletePokemon> {
        self.begin().await;
        let result = self.client.complete(identifier).await;
        let mut slots = self.slots.write().await;
        slots.active_loads = slots.active_loads.saturating_sub(1);

        match result {
            Ok(complete) => {
                slots.pokemon = Some(complete.pokemon.clone());
                Some(complete)
            }
            Err(e) => {
                warn!("Failed to fetch Pokémon data: {}", e);
                slots.error = Some(e);
                None
            }
        }
    }

    /// Best-effort batch detail fetch. Individual failures are not recorded.
    pub async fn fetch_details(
        &self,
        summaries: &[PokemonSummary],
        concurrency: Option<usize>,
    ) -> Vec<Arc<PokemonDetail>> {
        let concurrency = concurrency.unwrap_or(self.client.config().batch_concurrency);
        self.client.fetch_details(summaries, concurrency).await
    }

    /// Drop all cached resources held by the client.
    pub fn clear_cache(&self) {
        self.client.clear_cache();
    }

    // ========================================
    // State slots
    // ========================================

    /// Most recent failure, if the last operation failed.
    pub async fn error(&self) -> Option<PokedexError> {
        self.slots.read().await.error.clone()
    }

    pub async fn pokemons(&self) -> Vec<PokemonSummary> {
        self.slots.read().await.pokemons.clone()
    }

    pub async fn pokemon(&self) -> Option<Arc<PokemonDetail>> {
        self.slots.read().await.pokemon.clone()
    }

    pub async fn page(&self) -> u32 {
        self.slots.read().await.page
    }

    pub async fn page_size(&self) -> u32 {
        self.slots.read().await.page_size
    }

    pub async fn total(&self) -> u32 {
        self.slots.read().await.total
    }

    pub async fn is_loading(&self) -> bool {
        self.slots.read().await.active_loads > 0
    }

    pub async fn has_list(&self) -> bool {
        !self.slots.read().await.pokemons.is_empty()
    }

    pub async fn has_pokemon(&self) -> bool {
        self.slots.read().await.pokemon.is_some()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let slots = self.slots.read().await;
        SessionSnapshot {
            pokemons: slots.pokemons.clone(),
            pokemon: slots.pokemon.clone(),
            loading: slots.active_loads > 0,
            error: slots.error.as_ref().map(|e| e.to_string()),
            page: slots.page,
            page_size: slots.page_size,
            total: slots.total,
        }
    }

    // ========================================
    // Helpers
    // ========================================

    async fn begin(&self) {
        let mut slots = self.slots.write().await;
        slots.active_loads += 1;
        slots.error = None;
    }

    async fn clear_error(&self) {
        self.slots.write().await.error = None;
    }

    async fn record<T>(&self, result: crate::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Request failed: {}", e);
                self.slots.write().await.error = Some(e);
                None
            }
        }
    }
}
