//! Interactive session: stdin lines drive the search control, and every
//! location change re-renders the filtered grid.
//!
//! Plain lines are search text (debounced like keystrokes in a search box);
//! lines starting with `:` are commands.

use std::sync::Arc;

use anyhow::Result;
use pokedex_lib::loader::load_listing;
use pokedex_lib::search::option_label;
use pokedex_lib::{
    validation, CachedClient, FavoritesStore, GridController, PageLocation, PokedexConfig,
    SearchControl,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::commands::favorite::{print_favorite_state, toggle_favorite};
use crate::commands::list::{hydrate_grid, render_listing};
use crate::commands::show::show_detail;
use crate::commands::{favorites_for_display, open_favorites};
use crate::output::OutputFormat;

const HELP: &str = "Type to search. Commands: :type <name>, :fav <id>, :show <name>, :quit";

#[derive(Debug, PartialEq, Eq)]
enum BrowseInput<'a> {
    Search(&'a str),
    Category(&'a str),
    Favorite(i64),
    Show(&'a str),
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> BrowseInput<'_> {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return BrowseInput::Search(line);
    };
    let command = command.trim();
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "q" | "quit" => BrowseInput::Quit,
        "type" => BrowseInput::Category(arg),
        "fav" => match arg.parse::<i64>() {
            Ok(id) => BrowseInput::Favorite(id),
            Err(_) => BrowseInput::Invalid(format!(":fav needs a numeric id, got '{}'", arg)),
        },
        "show" if !arg.is_empty() => BrowseInput::Show(arg),
        "show" => BrowseInput::Invalid(":show needs a name or number".to_string()),
        other => BrowseInput::Invalid(format!("unknown command ':{}'. {}", other, HELP)),
    }
}

fn render(
    grid: &GridController<CachedClient>,
    location: &PageLocation,
    store: &FavoritesStore,
    format: &OutputFormat,
) -> Result<()> {
    println!("{}", location);
    render_listing(
        grid,
        &location.filter_state(),
        &favorites_for_display(store),
        format,
    )
}

pub async fn run(
    client: &Arc<CachedClient>,
    cfg: &PokedexConfig,
    format: &OutputFormat,
) -> Result<()> {
    let listing = load_listing(client, cfg).await;
    let grid = hydrate_grid(client, cfg, &listing).await?;
    let store = open_favorites(cfg);

    let (location_tx, mut location_rx) = watch::channel(PageLocation::root());
    let location_tx = Arc::new(location_tx);
    let mut control = SearchControl::new(
        Arc::clone(&location_tx),
        &listing.categories,
        cfg.category_option_cap,
        cfg.debounce,
    );

    let labels: Vec<String> = control.options().iter().map(|o| option_label(o)).collect();
    eprintln!("Types: {}", labels.join(", "));
    eprintln!("{}", HELP);
    let initial = location_rx.borrow_and_update().clone();
    render(&grid, &initial, &store, format)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut at_eof = false;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    at_eof = true;
                    break;
                };
                match parse_input(&line) {
                    BrowseInput::Quit => break,
                    BrowseInput::Search(text) => match validation::validate_search(text) {
                        Ok(text) => control.on_search_input(&text),
                        Err(e) => eprintln!("{}", e),
                    },
                    BrowseInput::Category(category) => {
                        if let Err(e) = control.on_category_change(category) {
                            eprintln!("{}", e);
                        }
                    }
                    BrowseInput::Favorite(id) => match toggle_favorite(Arc::clone(&store), id) {
                        Ok(is_favorite) => {
                            print_favorite_state(id, is_favorite, format);
                            let location = location_tx.borrow().clone();
                            render(&grid, &location, &store, format)?;
                        }
                        Err(e) => eprintln!("{:#}", e),
                    },
                    BrowseInput::Show(name) => {
                        show_detail(client, cfg, &store, name, format).await?;
                    }
                    BrowseInput::Invalid(message) => eprintln!("{}", message),
                }
            }
            changed = location_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let location = location_rx.borrow_and_update().clone();
                render(&grid, &location, &store, format)?;
            }
        }
    }

    // Piped input ends without a quiet period; apply the last search.
    if at_eof {
        control.flush().await;
        if location_rx.has_changed().unwrap_or(false) {
            let location = location_rx.borrow_and_update().clone();
            render(&grid, &location, &store, format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_search_text() {
        assert_eq!(parse_input("char"), BrowseInput::Search("char"));
        assert_eq!(parse_input(""), BrowseInput::Search(""));
        assert_eq!(parse_input("mr mime"), BrowseInput::Search("mr mime"));
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!(parse_input(":type fire"), BrowseInput::Category("fire"));
        assert_eq!(parse_input(":type"), BrowseInput::Category(""));
        assert_eq!(parse_input(":fav 25"), BrowseInput::Favorite(25));
        assert_eq!(parse_input("  :show  Pikachu "), BrowseInput::Show("Pikachu"));
        assert_eq!(parse_input(":quit"), BrowseInput::Quit);
        assert_eq!(parse_input(":q"), BrowseInput::Quit);
    }

    #[test]
    fn malformed_commands_are_invalid() {
        assert!(matches!(parse_input(":fav pikachu"), BrowseInput::Invalid(_)));
        assert!(matches!(parse_input(":show"), BrowseInput::Invalid(_)));
        assert!(matches!(parse_input(":jump 3"), BrowseInput::Invalid(_)));
    }
}
