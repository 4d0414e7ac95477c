//! Runtime configuration read from `POKEDEX_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PLACEHOLDER_DESCRIPTION: &str = "No hay descripción disponible.";

/// Tunables for loaders, the grid, the search control, and storage.
///
/// Every field has a default matching the public site's behaviour; the
/// environment only needs to override what differs.
#[derive(Clone, Debug)]
pub struct PokedexConfig {
    pub api_base_url: String,
    /// Entries requested from the listing endpoint.
    pub listing_limit: i64,
    /// Stubs hydrated by the grid controller.
    pub detail_fetch_cap: usize,
    /// Category names offered by the selector (before "all" is prepended).
    pub category_option_cap: usize,
    pub debounce: Duration,
    pub listing_ttl: Duration,
    pub categories_ttl: Duration,
    pub detail_ttl: Duration,
    /// Flavor-text languages in order of preference.
    pub description_languages: Vec<String>,
    pub placeholder_description: String,
    pub storage_path: PathBuf,
    /// Compare-and-swap attempts per favorite toggle.
    pub favorite_attempts: usize,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            listing_limit: 151,
            detail_fetch_cap: 50,
            category_option_cap: 18,
            debounce: Duration::from_millis(300),
            listing_ttl: Duration::from_secs(3600),
            categories_ttl: Duration::from_secs(86_400),
            detail_ttl: Duration::from_secs(3600),
            description_languages: vec!["es".to_string(), "en".to_string()],
            placeholder_description: DEFAULT_PLACEHOLDER_DESCRIPTION.to_string(),
            storage_path: PathBuf::from("pokedex.db"),
            favorite_attempts: 3,
        }
    }
}

impl PokedexConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("POKEDEX_API_URL").unwrap_or(defaults.api_base_url),
            listing_limit: env_parse("POKEDEX_LISTING_LIMIT", defaults.listing_limit),
            detail_fetch_cap: env_parse("POKEDEX_DETAIL_CAP", defaults.detail_fetch_cap),
            category_option_cap: env_parse(
                "POKEDEX_CATEGORY_OPTIONS",
                defaults.category_option_cap,
            ),
            debounce: Duration::from_millis(env_parse("POKEDEX_DEBOUNCE_MS", 300u64)),
            listing_ttl: Duration::from_secs(env_parse("POKEDEX_LIST_TTL_SECS", 3600u64)),
            categories_ttl: Duration::from_secs(env_parse("POKEDEX_TYPES_TTL_SECS", 86_400u64)),
            detail_ttl: Duration::from_secs(env_parse("POKEDEX_DETAIL_TTL_SECS", 3600u64)),
            description_languages: std::env::var("POKEDEX_LANGUAGES")
                .ok()
                .map(|raw| parse_languages(&raw))
                .filter(|langs| !langs.is_empty())
                .unwrap_or(defaults.description_languages),
            placeholder_description: defaults.placeholder_description,
            storage_path: std::env::var("POKEDEX_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            favorite_attempts: env_parse("POKEDEX_FAVORITE_ATTEMPTS", defaults.favorite_attempts)
                .max(1),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_languages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_behaviour() {
        let cfg = PokedexConfig::default();
        assert_eq!(cfg.listing_limit, 151);
        assert_eq!(cfg.detail_fetch_cap, 50);
        assert_eq!(cfg.category_option_cap, 18);
        assert_eq!(cfg.debounce, Duration::from_millis(300));
        assert_eq!(cfg.listing_ttl, Duration::from_secs(3600));
        assert_eq!(cfg.categories_ttl, Duration::from_secs(86_400));
        assert_eq!(cfg.description_languages, vec!["es", "en"]);
        assert_eq!(cfg.placeholder_description, "No hay descripción disponible.");
    }

    #[test]
    fn languages_are_trimmed_and_lowercased() {
        assert_eq!(parse_languages(" EN, ja ,,fr"), vec!["en", "ja", "fr"]);
        assert!(parse_languages(" , ").is_empty());
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("POKEDEX_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_parse("POKEDEX_TEST_GARBAGE", 7usize), 7);
        std::env::set_var("POKEDEX_TEST_NUMBER", " 12 ");
        assert_eq!(env_parse("POKEDEX_TEST_NUMBER", 7usize), 12);
    }
}
