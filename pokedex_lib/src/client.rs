//! Caching wrapper around the API client.

use std::time::Duration;

use pokeapi::types::{NamedResourceList, Pokemon, PokemonSpecies};
use pokeapi::{Client, ListQuery};
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::MemoryCache;
use crate::config::PokedexConfig;
use crate::error::PokedexError;

/// Revalidation windows per endpoint family.
#[derive(Clone, Copy, Debug)]
pub struct Revalidate {
    pub listing: Duration,
    pub categories: Duration,
    pub detail: Duration,
}

impl Default for Revalidate {
    fn default() -> Self {
        Self {
            listing: Duration::from_secs(3600),
            categories: Duration::from_secs(86_400),
            detail: Duration::from_secs(3600),
        }
    }
}

impl From<&PokedexConfig> for Revalidate {
    fn from(cfg: &PokedexConfig) -> Self {
        Self {
            listing: cfg.listing_ttl,
            categories: cfg.categories_ttl,
            detail: cfg.detail_ttl,
        }
    }
}

/// API client wrapper that adds in-memory response caching.
///
/// A response is reused until its endpoint's revalidation window elapses;
/// after that the next call goes to the network again. Failures are never
/// cached and never retried.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
    revalidate: Revalidate,
}

impl CachedClient {
    /// Creates a new cached client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, cache: MemoryCache) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            cache,
            revalidate: Revalidate::default(),
        }
    }

    pub fn from_config(cfg: &PokedexConfig) -> Self {
        Self {
            inner: Client::with_base_url(&cfg.api_base_url),
            cache: MemoryCache::new(cfg.detail_ttl),
            revalidate: Revalidate::from(cfg),
        }
    }

    pub fn with_revalidate(mut self, revalidate: Revalidate) -> Self {
        self.revalidate = revalidate;
        self
    }

    async fn cached<T, F, Fut>(
        &self,
        cache_key: String,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, PokedexError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, pokeapi::Error>>,
    {
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!("cache hit for {}", cache_key);
            let resp: T = serde_json::from_str(&cached).map_err(|e| {
                PokedexError::Cache(format!("unreadable entry {}: {}", cache_key, e))
            })?;
            return Ok(resp);
        }

        let resp = fetch().await?;
        let purged = self.cache.purge_stale();
        if purged > 0 {
            tracing::debug!("purged {} stale cache entries", purged);
        }
        if let Ok(json) = serde_json::to_string(&resp) {
            self.cache.insert_with_max_age(cache_key, json, ttl);
        }
        Ok(resp)
    }

    /// Fetches the Pokémon listing, returning cached results when available.
    pub async fn get_pokemon_list(
        &self,
        query: &ListQuery,
    ) -> Result<NamedResourceList, PokedexError> {
        let cache_key = format!("pokemon_list:{}", query.cache_key());
        self.cached(cache_key, self.revalidate.listing, || {
            self.inner.get_pokemon_list(query)
        })
        .await
    }

    /// Fetches the type list, returning cached results when available.
    pub async fn get_types(&self, query: &ListQuery) -> Result<NamedResourceList, PokedexError> {
        let cache_key = format!("types:{}", query.cache_key());
        self.cached(cache_key, self.revalidate.categories, || {
            self.inner.get_types(query)
        })
        .await
    }

    /// Fetches a single Pokémon, returning cached results when available.
    pub async fn get_pokemon(&self, name_or_id: &str) -> Result<Pokemon, PokedexError> {
        let cache_key = format!("pokemon:{}", name_or_id);
        self.cached(cache_key, self.revalidate.detail, || {
            self.inner.get_pokemon(name_or_id)
        })
        .await
    }

    /// Fetches species metadata, returning cached results when available.
    pub async fn get_species(&self, name_or_id: &str) -> Result<PokemonSpecies, PokedexError> {
        let cache_key = format!("species:{}", name_or_id);
        self.cached(cache_key, self.revalidate.detail, || {
            self.inner.get_species(name_or_id)
        })
        .await
    }

    /// Removes all entries from the cache.
    /// Number of responses currently held, stale ones included.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
