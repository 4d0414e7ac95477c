//! HTTP client for the PokéAPI v2 REST service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{ListQuery, Query},
    types::{NamedResourceList, Pokemon, PokemonSpecies},
    Error,
};

const USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the PokéAPI.
///
/// Holds one pooled `reqwest::Client` with a 30-second timeout. All
/// endpoints are unauthenticated `GET`s returning JSON.
pub struct Client {
    /// Base URL for the API. Defaults to `https://pokeapi.co/api/v2`.
    base_api_url: String,
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the public PokéAPI.
    pub fn new() -> Self {
        Self::with_base_url("https://pokeapi.co/api/v2")
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn get_url(&self, segments: &[&str], query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(segments, query)?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches a page of Pokémon list entries (`/pokemon`).
    pub async fn get_pokemon_list(&self, query: &ListQuery) -> Result<NamedResourceList, Error> {
        self.get::<NamedResourceList, ListQuery>(&["pokemon"], Some(query))
            .await
    }

    /// Fetches the type list (`/type`).
    pub async fn get_types(&self, query: &ListQuery) -> Result<NamedResourceList, Error> {
        self.get::<NamedResourceList, ListQuery>(&["type"], Some(query))
            .await
    }

    /// Fetches a single Pokémon by name or numeric id.
    pub async fn get_pokemon(&self, name_or_id: &str) -> Result<Pokemon, Error> {
        self.get::<Pokemon, ListQuery>(&["pokemon", name_or_id], None)
            .await
    }

    /// Fetches species metadata (flavor text) by name or numeric id.
    pub async fn get_species(&self, name_or_id: &str) -> Result<PokemonSpecies, Error> {
        self.get::<PokemonSpecies, ListQuery>(&["pokemon-species", name_or_id], None)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
