use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use pokedex_lib::catalog::display_number;
use pokedex_lib::{FavoriteToggle, FavoritesStore, PokedexConfig};
use serde::Serialize;

use crate::commands::open_favorites;
use crate::output::{print_favorites, print_json, OutputFormat};

#[derive(Args)]
pub struct FavoriteArgs {
    /// Pokémon id (dex number, e.g. 25)
    pub id: i64,
}

#[derive(Serialize)]
struct FavoriteState {
    id: i64,
    favorite: bool,
}

pub fn run(args: &FavoriteArgs, cfg: &PokedexConfig, format: &OutputFormat) -> Result<()> {
    let store = open_favorites(cfg);
    let is_favorite = toggle_favorite(store, args.id)?;
    print_favorite_state(args.id, is_favorite, format);
    Ok(())
}

pub fn run_list(cfg: &PokedexConfig, format: &OutputFormat) -> Result<()> {
    let favorites = open_favorites(cfg).get()?;
    print_favorites(&favorites, format)?;
    eprintln!("{} favorites", favorites.len());
    Ok(())
}

/// Toggles `id` through a freshly mounted toggle; returns the stored state.
pub fn toggle_favorite(store: Arc<FavoritesStore>, id: i64) -> Result<bool> {
    if id <= 0 {
        bail!("Pokémon id must be a positive number, got {}", id);
    }
    let mut toggle = FavoriteToggle::mount(store, id)?;
    Ok(toggle.activate()?)
}

pub fn print_favorite_state(id: i64, is_favorite: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&FavoriteState {
            id,
            favorite: is_favorite,
        }),
        _ if is_favorite => println!("{} added to favorites", display_number(id)),
        _ => println!("{} removed from favorites", display_number(id)),
    }
}
