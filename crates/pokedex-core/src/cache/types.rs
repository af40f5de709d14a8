//! Cache keys and statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of remote resource a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Pokemon,
    Species,
    EvolutionChain,
    Encounters,
    Catalog,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pokemon => "pokemon",
            ResourceKind::Species => "pokemon-species",
            ResourceKind::EvolutionChain => "evolution-chain",
            ResourceKind::Encounters => "encounters",
            ResourceKind::Catalog => "catalog",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Pokemon => "Pokémon",
            ResourceKind::Species => "Pokémon species",
            ResourceKind::EvolutionChain => "Evolution chain",
            ResourceKind::Encounters => "Encounters for",
            ResourceKind::Catalog => "Catalog",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite of resource kind and normalized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: ResourceKind,
    pub id: String,
}

impl CacheKey {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Counters for one cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Resolved entries currently held.
    pub entries: usize,
    /// Requests currently pending.
    pub in_flight: usize,
    /// Lookups answered from a resolved entry.
    pub hits: u64,
    /// Lookups that started a new fetch.
    pub misses: u64,
    /// Lookups that joined a fetch already in flight.
    pub coalesced: u64,
}
