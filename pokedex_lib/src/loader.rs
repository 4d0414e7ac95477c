//! Listing and detail loaders.
//!
//! Both fan out two requests concurrently and never propagate upstream
//! failures: the listing degrades each half to empty, the detail collapses
//! to "not found".

use pokeapi::{ListQuery, Query};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStub, DetailRecord};
use crate::client::CachedClient;
use crate::config::PokedexConfig;
use crate::validation;

/// What the listing page starts from.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    pub stubs: Vec<CatalogStub>,
    /// Type names in API order.
    pub categories: Vec<String>,
}

pub async fn load_listing(client: &CachedClient, cfg: &PokedexConfig) -> Listing {
    let list_query = ListQuery::default().with_limit(cfg.listing_limit);
    let types_query = ListQuery::default();
    let (stubs, categories) = tokio::join!(
        client.get_pokemon_list(&list_query),
        client.get_types(&types_query)
    );

    let stubs = match stubs {
        Ok(list) => list.results.into_iter().map(CatalogStub::from).collect(),
        Err(e) => {
            tracing::warn!("Error fetching Pokémon list: {}", e);
            Vec::new()
        }
    };
    let categories = match categories {
        Ok(types) => types.names(),
        Err(e) => {
            tracing::warn!("Error fetching types: {}", e);
            Vec::new()
        }
    };

    Listing { stubs, categories }
}

/// Loads the detail view for a name or dex number. `None` means not found:
/// an invalid identifier, or either upstream call failing.
pub async fn load_detail(
    client: &CachedClient,
    cfg: &PokedexConfig,
    name_or_id: &str,
) -> Option<DetailRecord> {
    let ident = match validation::validate_identifier(name_or_id) {
        Ok(ident) => ident,
        Err(e) => {
            tracing::debug!("Rejected detail lookup: {}", e);
            return None;
        }
    };

    let (pokemon, species) = tokio::join!(client.get_pokemon(&ident), client.get_species(&ident));
    match (pokemon, species) {
        (Ok(pokemon), Ok(species)) => Some(DetailRecord::from_parts(
            &pokemon,
            &species,
            &cfg.description_languages,
            &cfg.placeholder_description,
        )),
        (pokemon, species) => {
            for err in [pokemon.err(), species.err()].into_iter().flatten() {
                if err.is_not_found() {
                    tracing::debug!("No such Pokémon: {}", ident);
                } else {
                    tracing::warn!("Error fetching {}: {}", ident, err);
                }
            }
            None
        }
    }
}
