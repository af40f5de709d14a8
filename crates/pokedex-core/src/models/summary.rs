use serde::{Deserialize, Serialize};

/// A `{name, url}` reference to another API resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric id at the end of the resource URL.
    pub fn id(&self) -> Option<u32> {
        extract_id_from_url(&self.url)
    }
}

/// Minimal listing record for a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
    /// Trailing numeric id of `url`, `None` if the URL has none.
    pub id: Option<u32>,
}

impl PokemonSummary {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: name.into(),
            id: extract_id_from_url(&url),
            url,
        }
    }
}

impl From<NamedResource> for PokemonSummary {
    fn from(resource: NamedResource) -> Self {
        PokemonSummary::new(resource.name, resource.url)
    }
}

/// One page of the `/pokemon` listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokemonListResponse {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PokemonSummary>,
}

/// Raw listing page as sent by the API, before ids are extracted.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawListResponse {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl From<RawListResponse> for PokemonListResponse {
    fn from(raw: RawListResponse) -> Self {
        let results: Vec<PokemonSummary> =
            raw.results.into_iter().map(PokemonSummary::from).collect();
        Self {
            count: raw.count.unwrap_or(results.len() as u32),
            next: raw.next,
            previous: raw.previous,
            results,
        }
    }
}

/// Extract the trailing numeric id from a resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `Some(25)`.
pub fn extract_id_from_url(url: &str) -> Option<u32> {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| super::identifier::is_all_digits(segment))
        .and_then(|segment| segment.parse().ok())
}
