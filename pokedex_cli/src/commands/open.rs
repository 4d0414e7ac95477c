use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use pokedex_lib::loader::load_listing;
use pokedex_lib::{CachedClient, PokedexConfig, Route};

use crate::commands::list::{hydrate_grid, render_listing};
use crate::commands::show::show_detail;
use crate::commands::{favorites_for_display, open_favorites};
use crate::output::{print_page_not_found, OutputFormat};

#[derive(Args)]
pub struct OpenArgs {
    /// Page path, e.g. "/", "/?search=char&type=fire", "/pokemon/pikachu"
    pub path: String,
}

pub async fn run(
    args: &OpenArgs,
    client: &Arc<CachedClient>,
    cfg: &PokedexConfig,
    format: &OutputFormat,
) -> Result<()> {
    let route = Route::parse(&args.path);
    tracing::debug!("{} -> {:?}", args.path, route);

    let store = open_favorites(cfg);
    match route {
        Route::Listing(filter) => {
            let listing = load_listing(client, cfg).await;
            let grid = hydrate_grid(client, cfg, &listing).await?;
            render_listing(&grid, &filter, &favorites_for_display(&store), format)
        }
        Route::Detail(name) => show_detail(client, cfg, &store, &name, format).await,
        Route::NotFound => {
            print_page_not_found(&args.path, format);
            Ok(())
        }
    }
}
