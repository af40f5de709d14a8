//! Shared fixtures for integration tests against a mock PokéAPI.

#![allow(dead_code)]

use pokedex_core::{ClientConfig, PokeApiClient};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> Arc<PokeApiClient> {
    let config = ClientConfig::new().with_base_url(server.uri());
    Arc::new(PokeApiClient::with_config(config).expect("client should build"))
}

pub fn resource_url(kind: &str, id: u32) -> String {
    format!("https://pokeapi.co/api/v2/{}/{}/", kind, id)
}

pub fn detail_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "sprites": {},
        "types": [],
        "abilities": [],
        "stats": [],
        "moves": [],
        "species": { "name": name, "url": resource_url("pokemon-species", id) }
    })
}

pub fn list_json(count: u32, names: &[(u32, &str)]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .map(|(id, name)| json!({ "name": name, "url": resource_url("pokemon", *id) }))
        .collect();
    json!({
        "count": count,
        "next": null,
        "previous": null,
        "results": results
    })
}

pub fn starters() -> Vec<(u32, &'static str)> {
    vec![
        (1, "bulbasaur"),
        (2, "ivysaur"),
        (3, "venusaur"),
        (4, "charmander"),
        (5, "charmeleon"),
    ]
}
