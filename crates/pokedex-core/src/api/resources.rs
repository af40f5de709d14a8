//! Single-resource lookups and the paginated listing.

use super::PokeApiClient;
use crate::cache::{CacheKey, ResourceKind};
use crate::error::{PokedexError, Result};
use crate::models::RawListResponse;
use crate::models::{
    CompletePokemon, EvolutionChain, Identifier, LocationArea, PokemonDetail,
    PokemonListResponse, PokemonSpecies,
};
use crate::network::encode_segment;
use std::sync::Arc;
use tracing::{debug, warn};

impl PokeApiClient {
    /// Fetch one page of the catalog.
    ///
    /// `page` is 1-based. The listing is not memoized: every call hits the API.
    pub async fn list_page(&self, page: u32, page_size: u32) -> Result<PokemonListResponse> {
        if page == 0 {
            return Err(PokedexError::validation("page", "must be at least 1"));
        }
        if page_size == 0 {
            return Err(PokedexError::validation("page_size", "must be positive"));
        }

        let offset = u64::from(page - 1) * u64::from(page_size);
        let raw: RawListResponse = self
            .http
            .get_json(
                "/pokemon",
                &[("limit", page_size.to_string()), ("offset", offset.to_string())],
                ResourceKind::Pokemon,
                "list",
            )
            .await?;

        let mut response = PokemonListResponse::from(raw);
        // Guard against servers that ignore `limit`.
        response.results.truncate(page_size as usize);
        debug!(
            "Listed page {} ({} of {} entries)",
            page,
            response.results.len(),
            response.count
        );
        Ok(response)
    }

    /// Fetch a Pokémon by id or name (case-insensitive).
    ///
    /// A 404 yields [`PokedexError::NotFound`]. The result is cached under
    /// both its numeric id and its name.
    pub async fn pokemon(&self, identifier: impl Into<Identifier>) -> Result<Arc<PokemonDetail>> {
        let identifier = identifier.into();
        let key = checked_key(&identifier)?;

        let http = self.http.clone();
        let path = format!("/pokemon/{}", encode_segment(&key));
        let label = key.clone();
        let primary = CacheKey::new(ResourceKind::Pokemon, key);
        let detail = self
            .pokemon
            .get_or_fetch(primary.clone(), move || async move {
                let detail: PokemonDetail = http
                    .get_json(&path, &[], ResourceKind::Pokemon, &label)
                    .await?;
                Ok(Arc::new(detail))
            })
            .await?;

        // A fetch that outlived a clear is not stored, so it gets no aliases either.
        if self.pokemon.contains(&primary) {
            self.cache_detail(detail.clone());
        }
        Ok(detail)
    }

    /// Store a detail under both of its identities.
    pub(super) fn cache_detail(&self, detail: Arc<PokemonDetail>) {
        for alias in [detail.id.to_string(), detail.name.to_lowercase()] {
            let key = CacheKey::new(ResourceKind::Pokemon, alias);
            if !self.pokemon.contains(&key) {
                self.pokemon.insert(key, detail.clone());
            }
        }
    }

    /// Cached detail for a Pokémon, without fetching.
    pub fn cached_pokemon(&self, identifier: impl Into<Identifier>) -> Option<Arc<PokemonDetail>> {
        let key = identifier.into().key();
        self.pokemon.get(&CacheKey::new(ResourceKind::Pokemon, key))
    }

    /// Fetch species data by id or name.
    pub async fn species(&self, identifier: impl Into<Identifier>) -> Result<Arc<PokemonSpecies>> {
        let identifier = identifier.into();
        let key = checked_key(&identifier)?;

        let http = self.http.clone();
        let path = format!("/pokemon-species/{}", encode_segment(&key));
        let label = key.clone();
        self.species
            .get_or_fetch(CacheKey::new(ResourceKind::Species, key), move || async move {
                let species: PokemonSpecies = http
                    .get_json(&path, &[], ResourceKind::Species, &label)
                    .await?;
                Ok(Arc::new(species))
            })
            .await
    }

    /// Fetch an evolution chain by its numeric id.
    pub async fn evolution_chain(&self, chain_id: u32) -> Result<Arc<EvolutionChain>> {
        let http = self.http.clone();
        let label = chain_id.to_string();
        let path = format!("/evolution-chain/{}", chain_id);
        self.evolution
            .get_or_fetch(
                CacheKey::new(ResourceKind::EvolutionChain, label.clone()),
                move || async move {
                    let chain: EvolutionChain = http
                        .get_json(&path, &[], ResourceKind::EvolutionChain, &label)
                        .await?;
                    Ok(Arc::new(chain))
                },
            )
            .await
    }

    /// Fetch the location areas where a Pokémon can be encountered.
    ///
    /// A 404 means the API has no encounter data and yields an empty list.
    pub async fn encounters(
        &self,
        identifier: impl Into<Identifier>,
    ) -> Result<Arc<Vec<LocationArea>>> {
        let identifier = identifier.into();
        let key = checked_key(&identifier)?;

        let http = self.http.clone();
        let path = format!("/pokemon/{}/encounters", encode_segment(&key));
        let label = key.clone();
        self.encounters
            .get_or_fetch(CacheKey::new(ResourceKind::Encounters, key), move || async move {
                match http
                    .get_json::<Vec<LocationArea>>(&path, &[], ResourceKind::Encounters, &label)
                    .await
                {
                    Ok(areas) => Ok(Arc::new(areas)),
                    Err(e) if e.is_not_found() => {
                        debug!("No encounter data for {}", label);
                        Ok(Arc::new(Vec::new()))
                    }
                    Err(e) => Err(e),
                }
            })
            .await
    }

    /// Fetch everything the detail view needs.
    ///
    /// Detail and species are fetched together, then the evolution chain and
    /// encounters. Detail and species are required; a failed evolution or
    /// encounter lookup degrades to `None` or an empty list.
    pub async fn complete(&self, identifier: impl Into<Identifier>) -> Result<CompletePokemon> {
        let identifier = identifier.into();

        let (pokemon, species) = tokio::try_join!(
            self.pokemon(identifier.clone()),
            self.species(identifier.clone())
        )?;

        let evolution_lookup = async {
            let chain_id = species.evolution_chain_id()?;
            match self.evolution_chain(chain_id).await {
                Ok(chain) => Some(chain),
                Err(e) => {
                    warn!("Evolution chain {} unavailable: {}", chain_id, e);
                    None
                }
            }
        };
        let (evolution, locations) = tokio::join!(evolution_lookup, self.encounters(identifier));

        let locations = locations.unwrap_or_else(|e| {
            warn!("Encounters for {} unavailable: {}", pokemon.name, e);
            Arc::new(Vec::new())
        });

        Ok(CompletePokemon {
            pokemon,
            species,
            evolution,
            locations,
        })
    }
}

fn checked_key(identifier: &Identifier) -> Result<String> {
    if identifier.is_empty() {
        return Err(PokedexError::validation("identifier", "must not be empty"));
    }
    Ok(identifier.key())
}
