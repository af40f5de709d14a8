//! Pokedex Core - typed, caching client for the public PokéAPI.
//!
//! This crate fetches Pokémon listings, details, species, evolution chains
//! and encounter locations. Every resource goes through a memoizing cache
//! that collapses concurrent identical requests into one network call.
//! Search tries an exact lookup first and falls back to a substring filter
//! over the full catalog, which is fetched once per client.
//!
//! Two layers are exposed:
//! - [`PokeApiClient`] returns `Result` from every operation.
//! - [`Pokedex`] wraps a client with UI-style state slots and never fails;
//!   errors land in an error slot and operations return fallbacks.
//!
//! # Example
//!
//! ```rust,ignore
//! use pokedex_core::{Pokedex, PokeApiClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pokedex_core::Result<()> {
//!     let client = Arc::new(PokeApiClient::new()?);
//!
//!     let matches = client.search("saur", 10).await?;
//!     println!("Found {} matches", matches.len());
//!
//!     let pokedex = Pokedex::new(client);
//!     if pokedex.get(9999999u32).await.is_none() {
//!         println!("{:?}", pokedex.error().await);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod session;

// Re-export commonly used types
pub use api::{PokeApiClient, PokeApiClientBuilder};
pub use cache::{CacheKey, CacheStats, MemoCache, ResourceKind};
pub use config::{ClientConfig, NetworkConfig, PokeApiConfig};
pub use error::{PokedexError, Result};
pub use models::{
    CompletePokemon, EvolutionChain, EvolutionStage, Identifier, LocationArea, PokemonDetail,
    PokemonListResponse, PokemonSpecies, PokemonSummary,
};
pub use session::{Pokedex, SessionSnapshot};
