//! Data types returned by the PokéAPI and the identifiers used to request them.
//!
//! Field names follow the API's JSON so the structs deserialize directly.
//! Optional or loosely-typed parts of a response default to empty values
//! instead of failing the whole decode.

mod evolution;
mod identifier;
mod location;
mod pokemon;
mod species;
mod summary;

pub use evolution::{EvolutionChain, EvolutionDetail, EvolutionNode, EvolutionStage};
pub use identifier::Identifier;
pub use location::{EncounterDetail, LocationArea, VersionEncounterDetail};
pub use pokemon::{
    AnimatedSprites, OtherSprites, PokemonAbility, PokemonDetail, PokemonMove, PokemonStat,
    PokemonType, SpriteImages, Sprites,
};
pub use species::{EvolutionChainRef, FlavorTextEntry, Genus, PokemonSpecies};
pub use summary::{extract_id_from_url, NamedResource, PokemonListResponse, PokemonSummary};
pub(crate) use summary::RawListResponse;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the detail view needs for one Pokémon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletePokemon {
    pub pokemon: Arc<PokemonDetail>,
    pub species: Arc<PokemonSpecies>,
    /// `None` when the evolution chain could not be fetched.
    pub evolution: Option<Arc<EvolutionChain>>,
    pub locations: Arc<Vec<LocationArea>>,
}
