use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pokedex_lib::loader::{load_listing, Listing};
use pokedex_lib::search::category_options;
use pokedex_lib::{
    validation, CachedClient, FavoriteSet, FilterState, GridController, PokedexConfig,
};

use crate::commands::{favorites_for_display, open_favorites};
use crate::output::{print_items, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Only show Pokémon whose name contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Only show Pokémon of this type (e.g. fire, water, electric)
    #[arg(long = "type")]
    pub category: Option<String>,
}

pub async fn run(
    args: &ListArgs,
    client: &Arc<CachedClient>,
    cfg: &PokedexConfig,
    format: &OutputFormat,
) -> Result<()> {
    let search = validation::validate_search(args.search.as_deref().unwrap_or(""))?;
    let listing = load_listing(client, cfg).await;
    let options = category_options(&listing.categories, cfg.category_option_cap);
    let category =
        validation::validate_category(args.category.as_deref().unwrap_or(""), &options)?;

    let grid = hydrate_grid(client, cfg, &listing).await?;
    let favorites = favorites_for_display(&open_favorites(cfg));
    render_listing(&grid, &FilterState::new(&search, &category), &favorites, format)
}

/// Loads the grid for `listing`, with a spinner on stderr while it is LOADING.
pub async fn hydrate_grid(
    client: &Arc<CachedClient>,
    cfg: &PokedexConfig,
    listing: &Listing,
) -> Result<GridController<CachedClient>> {
    let grid = GridController::new(Arc::clone(client), cfg.detail_fetch_cap);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} [{elapsed}] {msg}")?);
    spinner.set_message(format!(
        "loading {} of {} Pokémon...",
        listing.stubs.len().min(cfg.detail_fetch_cap),
        listing.stubs.len()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));
    grid.load(&listing.stubs).await;
    spinner.finish_and_clear();

    Ok(grid)
}

/// Prints the entries `filter` selects, with a count line on stderr.
pub fn render_listing(
    grid: &GridController<CachedClient>,
    filter: &FilterState,
    favorites: &FavoriteSet,
    format: &OutputFormat,
) -> Result<()> {
    let visible = grid.visible(filter);
    let total = grid.entries().len();
    print_items(&visible, favorites, format)?;

    let failed = visible.iter().filter(|e| e.is_failed()).count();
    if failed > 0 {
        eprintln!(
            "{} of {} Pokémon shown ({} unavailable)",
            visible.len(),
            total,
            failed
        );
    } else {
        eprintln!("{} of {} Pokémon shown", visible.len(), total);
    }
    Ok(())
}
