use super::summary::NamedResource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// Evolution chain (`/evolution-chain/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: EvolutionNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionNode {
    #[serde(default)]
    pub is_baby: bool,
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
}

/// Conditions for one evolution step. Less common conditions stay in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub trigger: Option<NamedResource>,
    #[serde(default)]
    pub item: Option<NamedResource>,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One species in a flattened evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    /// 0 for the base form, 1 for its evolutions, and so on.
    pub depth: u32,
    pub species: String,
    pub species_id: Option<u32>,
    pub is_baby: bool,
    pub min_level: Option<u32>,
    pub trigger: Option<String>,
    pub item: Option<String>,
}

impl EvolutionChain {
    /// Flatten the chain breadth-first, so stages come out ordered by depth
    /// and branches keep the API's order.
    pub fn stages(&self) -> Vec<EvolutionStage> {
        let mut stages = Vec::new();
        let mut queue = VecDeque::from([(0u32, &self.chain)]);

        while let Some((depth, node)) = queue.pop_front() {
            let detail = node.evolution_details.first();
            stages.push(EvolutionStage {
                depth,
                species: node.species.name.clone(),
                species_id: node.species.id(),
                is_baby: node.is_baby,
                min_level: detail.and_then(|d| d.min_level),
                trigger: detail.and_then(|d| d.trigger.as_ref()).map(|t| t.name.clone()),
                item: detail.and_then(|d| d.item.as_ref()).map(|i| i.name.clone()),
            });
            queue.extend(node.evolves_to.iter().map(|next| (depth + 1, next)));
        }

        stages
    }

    /// Species names in the chain, base form first.
    pub fn species_names(&self) -> Vec<String> {
        self.stages().into_iter().map(|s| s.species).collect()
    }
}
