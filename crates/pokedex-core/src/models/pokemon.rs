use super::summary::{NamedResource, PokemonSummary};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full record for one Pokémon (`/pokemon/{id|name}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    /// Height in decimetres.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
    #[serde(default)]
    pub species: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
    /// Per-generation sprite sets, kept as raw JSON.
    #[serde(default)]
    pub versions: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<SpriteImages>,
    #[serde(default)]
    pub dream_world: Option<SpriteImages>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteImages {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

/// Generation-V animated sprites (`versions.generation-v.black-white.animated`).
pub type AnimatedSprites = SpriteImages;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonAbility {
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: u8,
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonMove {
    #[serde(rename = "move")]
    pub move_resource: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<Value>,
}

impl Sprites {
    pub fn official_artwork(&self) -> Option<&str> {
        self.other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
    }

    pub fn animated(&self) -> Option<AnimatedSprites> {
        let animated = self
            .versions
            .as_ref()?
            .pointer("/generation-v/black-white/animated")?;
        serde_json::from_value(animated.clone()).ok()
    }
}

impl PokemonDetail {
    /// Best display image: official artwork, then the default front sprite.
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .official_artwork()
            .or(self.sprites.front_default.as_deref())
    }

    /// Type names ordered by slot.
    pub fn type_names(&self) -> Vec<&str> {
        let mut types: Vec<&PokemonType> = self.types.iter().collect();
        types.sort_by_key(|t| t.slot);
        types.into_iter().map(|t| t.kind.name.as_str()).collect()
    }

    /// Base value of a stat such as `"hp"` or `"special-attack"`.
    pub fn base_stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }

    pub fn total_base_stats(&self) -> u32 {
        self.stats.iter().map(|s| s.base_stat).sum()
    }

    /// Listing record pointing at this Pokémon's canonical URL under `api_base`.
    pub fn summary(&self, api_base: &str) -> PokemonSummary {
        PokemonSummary {
            name: self.name.clone(),
            url: format!("{}/pokemon/{}/", api_base.trim_end_matches('/'), self.id),
            id: Some(self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bulbasaur() -> PokemonDetail {
        serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "base_experience": 64,
            "sprites": {
                "front_default": "front.png",
                "back_default": "back.png",
                "other": {
                    "official-artwork": { "front_default": "artwork.png", "front_shiny": null },
                    "home": { "front_default": "home.png" }
                },
                "versions": {
                    "generation-v": {
                        "black-white": {
                            "animated": { "front_default": "anim.gif", "front_shiny": "anim-shiny.gif" }
                        }
                    }
                }
            },
            "types": [
                { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } },
                { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } }
            ],
            "abilities": [
                { "is_hidden": false, "slot": 1, "ability": { "name": "overgrow", "url": "" } },
                { "is_hidden": true, "slot": 3, "ability": { "name": "chlorophyll", "url": "" } }
            ],
            "stats": [
                { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
                { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } },
                { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "" } }
            ],
            "moves": [
                { "move": { "name": "razor-wind", "url": "" }, "version_group_details": [] }
            ],
            "species": { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/" }
        }))
        .unwrap()
    }

    #[test]
    fn test_minimal_payload_deserializes() {
        let detail: PokemonDetail = serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "sprites": {},
            "types": [],
            "abilities": [],
            "stats": [],
            "moves": []
        }))
        .unwrap();
        assert_eq!(detail.name, "bulbasaur");
        assert!(detail.artwork_url().is_none());
        assert_eq!(detail.total_base_stats(), 0);
    }

    #[test]
    fn test_sprite_helpers() {
        let detail = bulbasaur();
        assert_eq!(detail.artwork_url(), Some("artwork.png"));
        assert!(detail.sprites.extra.contains_key("back_default"));
        let animated = detail.sprites.animated().unwrap();
        assert_eq!(animated.front_default.as_deref(), Some("anim.gif"));
    }

    #[test]
    fn test_stat_and_type_helpers() {
        let detail = bulbasaur();
        assert_eq!(detail.type_names(), vec!["grass", "poison"]);
        assert_eq!(detail.base_stat("special-attack"), Some(65));
        assert_eq!(detail.base_stat("speed"), None);
        assert_eq!(detail.total_base_stats(), 159);
        assert_eq!(detail.moves[0].move_resource.name, "razor-wind");
        assert_eq!(detail.species.id(), Some(1));
    }

    #[test]
    fn test_summary_url() {
        let summary = bulbasaur().summary("https://pokeapi.co/api/v2/");
        assert_eq!(summary.url, "https://pokeapi.co/api/v2/pokemon/1/");
        assert_eq!(summary.id, Some(1));
    }
}
