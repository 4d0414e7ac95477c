use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use pokedex_lib::loader::{load_detail, load_listing};
use pokedex_lib::suggest::suggest_names;
use pokedex_lib::{CachedClient, FavoritesStore, PokedexConfig};

use crate::commands::{favorites_for_display, open_favorites};
use crate::output::{print_detail, print_not_found, OutputFormat};

const MAX_SUGGESTIONS: usize = 3;

#[derive(Args)]
pub struct ShowArgs {
    /// Pokémon name or dex number (e.g. pikachu, 25)
    pub name: String,
}

pub async fn run(
    args: &ShowArgs,
    client: &Arc<CachedClient>,
    cfg: &PokedexConfig,
    format: &OutputFormat,
) -> Result<()> {
    let store = open_favorites(cfg);
    show_detail(client, cfg, &store, &args.name, format).await
}

/// Renders the detail view for `name`, or the not-found view with
/// suggestions from the listing.
pub async fn show_detail(
    client: &CachedClient,
    cfg: &PokedexConfig,
    store: &FavoritesStore,
    name: &str,
    format: &OutputFormat,
) -> Result<()> {
    match load_detail(client, cfg, name).await {
        Some(record) => {
            let is_favorite = favorites_for_display(store).contains(record.item.id);
            print_detail(&record, is_favorite, format)
        }
        None => {
            let listing = load_listing(client, cfg).await;
            let suggestions = suggest_names(name, &listing.stubs, MAX_SUGGESTIONS);
            print_not_found(name.trim(), &suggestions, format);
            Ok(())
        }
    }
}
