//! Two-phase search: exact lookup first, then a substring filter over the
//! full catalog.
//!
//! The API has no substring endpoint, so the complete list of summaries is
//! fetched once per client and filtered locally on every later search.

use super::PokeApiClient;
use crate::cache::{CacheKey, ResourceKind};
use crate::error::{PokedexError, Result};
use crate::models::{Identifier, PokemonListResponse, PokemonSummary, RawListResponse};
use std::sync::Arc;
use tracing::{debug, info};

const CATALOG_KEY: &str = "all";

impl PokeApiClient {
    /// Search by id, exact name, or name substring.
    ///
    /// An exact hit returns a single summary without touching the catalog.
    /// Otherwise the catalog is filtered by case-insensitive substring,
    /// keeping catalog order and at most `max_results` entries.
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<PokemonSummary>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(PokedexError::EmptyQuery);
        }

        match self.pokemon(Identifier::parse(&query)).await {
            Ok(detail) => {
                debug!("Exact match for '{}': #{}", query, detail.id);
                return Ok(vec![detail.summary(self.http.base_url())]);
            }
            Err(e) => {
                debug!("No exact match for '{}' ({}), filtering catalog", query, e);
            }
        }

        let catalog = self.catalog().await?;
        let matches = filter_catalog(&catalog, &query, max_results);
        info!(
            "Search '{}' matched {} of {} catalog entries",
            query,
            matches.len(),
            catalog.len()
        );
        Ok(matches)
    }

    /// Search with the configured result cap.
    pub async fn search_default(&self, query: &str) -> Result<Vec<PokemonSummary>> {
        self.search(query, self.config.search_max_results).await
    }

    /// Complete list of summaries, fetched once and then served from cache.
    ///
    /// The API is asked for the total count first, then for every entry in
    /// a single page.
    pub async fn catalog(&self) -> Result<Arc<Vec<PokemonSummary>>> {
        let http = self.http.clone();
        self.catalog
            .get_or_fetch(
                CacheKey::new(ResourceKind::Catalog, CATALOG_KEY),
                move || async move {
                    let head: RawListResponse = http
                        .get_json(
                            "/pokemon",
                            &[("limit", "1".to_string())],
                            ResourceKind::Catalog,
                            CATALOG_KEY,
                        )
                        .await?;
                    let count = head.count.unwrap_or(0);
                    if count == 0 {
                        return Ok(Arc::new(Vec::new()));
                    }

                    let full: RawListResponse = http
                        .get_json(
                            "/pokemon",
                            &[("limit", count.to_string()), ("offset", "0".to_string())],
                            ResourceKind::Catalog,
                            CATALOG_KEY,
                        )
                        .await?;
                    let catalog = PokemonListResponse::from(full).results;
                    info!("Fetched catalog of {} entries", catalog.len());
                    Ok(Arc::new(catalog))
                },
            )
            .await
    }
}

/// Case-insensitive substring filter that preserves catalog order.
pub(crate) fn filter_catalog(
    catalog: &[PokemonSummary],
    query: &str,
    max_results: usize,
) -> Vec<PokemonSummary> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .take(max_results)
        .cloned()
        .collect()
}
