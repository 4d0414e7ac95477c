//! Library layer for the Pokédex: cached API client, loaders, grid
//! controller, search/filter state, and the persisted favorites store.
//!
//! Wraps the `pokeapi` crate with an in-memory revalidation cache and
//! exposes the fetch / filter / persist pipeline the CLI views are built on.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod debounce;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod grid;
pub mod loader;
pub mod route;
pub mod search;
pub mod suggest;
pub mod validation;

pub use pokeapi;
pub use pokeapi::types;
pub use pokeapi::{ListQuery, Query};

pub use catalog::{CatalogItem, CatalogStub, DetailRecord, StatValue};
pub use client::CachedClient;
pub use config::PokedexConfig;
pub use db::{Db, StorageError};
pub use debounce::Debouncer;
pub use error::PokedexError;
pub use favorites::{
    FavoriteSet, FavoriteToggle, FavoritesError, FavoritesStore, MemoryStorage, StoragePort,
    Versioned, FAVORITES_KEY,
};
pub use filter::{FilterState, ALL_CATEGORIES};
pub use grid::{DetailSource, GridController, GridEntry, GridPhase, LoadOutcome};
pub use loader::Listing;
pub use route::Route;
pub use search::{PageLocation, SearchControl};
