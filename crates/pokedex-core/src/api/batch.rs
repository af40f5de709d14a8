//! Batch detail fetches with bounded concurrency.

use super::PokeApiClient;
use crate::models::{Identifier, PokemonDetail, PokemonSummary};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

impl PokeApiClient {
    /// Fetch details for many summaries with at most `concurrency` requests
    /// in flight.
    ///
    /// Summaries whose detail is already cached are served from the cache.
    /// Failed items are skipped, so the result may be shorter than the
    /// input. Output order is unspecified.
    pub async fn fetch_details(
        &self,
        summaries: &[PokemonSummary],
        concurrency: usize,
    ) -> Vec<Arc<PokemonDetail>> {
        let limit = concurrency.max(1);

        let details: Vec<Arc<PokemonDetail>> = stream::iter(summaries)
            .map(|summary| self.detail_for_summary(summary))
            .buffer_unordered(limit)
            .filter_map(|detail| async move { detail })
            .collect()
            .await;

        info!(
            "Batch fetched {} of {} details ({} workers)",
            details.len(),
            summaries.len(),
            limit
        );
        details
    }

    /// Batch fetch with the configured worker count.
    pub async fn fetch_details_default(
        &self,
        summaries: &[PokemonSummary],
    ) -> Vec<Arc<PokemonDetail>> {
        self.fetch_details(summaries, self.config.batch_concurrency)
            .await
    }

    async fn detail_for_summary(&self, summary: &PokemonSummary) -> Option<Arc<PokemonDetail>> {
        let by_id = summary.id.and_then(|id| self.cached_pokemon(id));
        if let Some(cached) = by_id.or_else(|| self.cached_pokemon(summary.name.as_str())) {
            return Some(cached);
        }

        let identifier = match summary.id {
            Some(id) => Identifier::Id(id),
            None => Identifier::parse(&summary.name),
        };
        match self.pokemon(identifier).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                debug!("Skipping {} in batch: {}", summary.name, e);
                None
            }
        }
    }
}
