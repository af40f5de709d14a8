use super::summary::NamedResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a Pokémon can be encountered (`/pokemon/{id}/encounters`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationArea {
    pub location_area: NamedResource,
    #[serde(default)]
    pub version_details: Vec<VersionEncounterDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEncounterDetail {
    #[serde(default)]
    pub max_chance: u32,
    #[serde(default)]
    pub encounter_details: Vec<EncounterDetail>,
    pub version: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterDetail {
    pub min_level: u32,
    pub max_level: u32,
    #[serde(default)]
    pub condition_values: Vec<Value>,
    pub chance: u32,
    pub method: NamedResource,
}

impl LocationArea {
    /// Game versions this area appears in.
    pub fn version_names(&self) -> Vec<&str> {
        self.version_details
            .iter()
            .map(|v| v.version.name.as_str())
            .collect()
    }

    /// Lowest and highest encounter level across all versions.
    pub fn level_range(&self) -> Option<(u32, u32)> {
        self.version_details
            .iter()
            .flat_map(|v| v.encounter_details.iter())
            .fold(None, |range, d| match range {
                None => Some((d.min_level, d.max_level)),
                Some((lo, hi)) => Some((lo.min(d.min_level), hi.max(d.max_level))),
            })
    }
}
