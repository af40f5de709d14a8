use super::summary::{extract_id_from_url, NamedResource};
use serde::{Deserialize, Serialize};

/// Species record (`/pokemon-species/{id|name}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub evolution_chain: Option<EvolutionChainRef>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<Genus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionChainRef {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
    #[serde(default)]
    pub version: Option<NamedResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

impl PokemonSpecies {
    /// Id of the evolution chain this species belongs to.
    pub fn evolution_chain_id(&self) -> Option<u32> {
        self.evolution_chain
            .as_ref()
            .and_then(|c| extract_id_from_url(&c.url))
    }

    /// First flavor text in `language`, with the game text's line and page
    /// breaks collapsed to single spaces.
    pub fn flavor_text(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|e| e.language.name == language)
            .map(|e| {
                e.flavor_text
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
    }

    /// Category such as "Seed Pokémon" in `language`.
    pub fn genus(&self, language: &str) -> Option<&str> {
        self.genera
            .iter()
            .find(|g| g.language.name == language)
            .map(|g| g.genus.as_str())
    }
}
