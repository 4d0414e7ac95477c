//! Error types for the library layer.

use std::fmt;

use crate::favorites::FavoritesError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding cache, input validation, and favorites failures.
#[derive(Debug)]
pub enum PokedexError {
    /// An error from the underlying API client.
    Api(pokeapi::Error),
    /// A cache operation failed (e.g. deserialization of cached data).
    Cache(String),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Reading or writing the favorite set failed.
    Favorites(FavoritesError),
}

impl PokedexError {
    /// True when the upstream API answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_not_found())
    }
}

impl fmt::Display for PokedexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Cache(msg) => write!(f, "Cache error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Favorites(e) => write!(f, "Favorites error: {}", e),
        }
    }
}

impl std::error::Error for PokedexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Favorites(e) => Some(e),
            _ => None,
        }
    }
}

impl From<pokeapi::Error> for PokedexError {
    fn from(e: pokeapi::Error) -> Self {
        Self::Api(e)
    }
}

impl From<FavoritesError> for PokedexError {
    fn from(e: FavoritesError) -> Self {
        Self::Favorites(e)
    }
}
