mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pokedex_lib::{CachedClient, PokedexConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse Pokémon from PokéAPI with search, type filters, and favorites")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Pokémon, optionally filtered by name and type
    List(commands::list::ListArgs),
    /// Show one Pokémon by name or dex number
    Show(commands::show::ShowArgs),
    /// Open a page path such as "/?type=fire" or "/pokemon/pikachu"
    Open(commands::open::OpenArgs),
    /// Toggle the favorite marker on a Pokémon id
    Favorite(commands::favorite::FavoriteArgs),
    /// List favorite Pokémon ids
    Favorites,
    /// Interactive search session reading from stdin
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pokedex=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);
    let cfg = PokedexConfig::from_env();
    let client = Arc::new(CachedClient::from_config(&cfg));

    match &cli.command {
        Commands::List(args) => commands::list::run(args, &client, &cfg, &format).await?,
        Commands::Show(args) => commands::show::run(args, &client, &cfg, &format).await?,
        Commands::Open(args) => commands::open::run(args, &client, &cfg, &format).await?,
        Commands::Favorite(args) => commands::favorite::run(args, &cfg, &format)?,
        Commands::Favorites => commands::favorite::run_list(&cfg, &format)?,
        Commands::Browse => commands::browse::run(&client, &cfg, &format).await?,
    }

    Ok(())
}
