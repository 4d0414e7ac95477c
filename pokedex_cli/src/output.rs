use anyhow::Result;
use pokedex_lib::catalog::{capitalize, humanize};
use pokedex_lib::search::option_label;
use pokedex_lib::{DetailRecord, FavoriteSet, GridEntry};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const STAT_BAR_WIDTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ItemRow {
    #[tabled(rename = "No.")]
    #[serde(rename = "No.")]
    number: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Types")]
    #[serde(rename = "Types")]
    types: String,
    #[tabled(rename = "Fav")]
    #[serde(rename = "Fav")]
    favorite: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct StatRow {
    #[tabled(rename = "Stat")]
    #[serde(rename = "Stat")]
    stat: String,
    #[tabled(rename = "Base")]
    #[serde(rename = "Base")]
    base: i64,
    #[tabled(rename = "Bar")]
    #[serde(skip)]
    bar: String,
}

#[derive(Tabled, Serialize)]
struct FavoriteRow {
    #[tabled(rename = "No.")]
    #[serde(rename = "No.")]
    number: String,
    #[tabled(rename = "Id")]
    #[serde(rename = "Id")]
    id: i64,
}

#[derive(Serialize)]
struct NotFoundView<'a> {
    error: &'static str,
    query: &'a str,
    suggestions: &'a [String],
}

// -- Row builders --

fn build_item_rows(entries: &[GridEntry], favorites: &FavoriteSet) -> Vec<ItemRow> {
    entries
        .iter()
        .map(|entry| match entry {
            GridEntry::Loaded(item) => ItemRow {
                number: item.number(),
                name: capitalize(&item.name),
                types: item
                    .categories
                    .iter()
                    .map(|c| option_label(c))
                    .collect::<Vec<_>>()
                    .join(", "),
                favorite: if favorites.contains(item.id) {
                    "★".to_string()
                } else {
                    String::new()
                },
                status: String::new(),
            },
            GridEntry::Failed { name, reason } => ItemRow {
                number: "#???".to_string(),
                name: capitalize(name),
                types: String::new(),
                favorite: String::new(),
                status: format!("unavailable: {}", reason),
            },
        })
        .collect()
}

fn build_stat_rows(record: &DetailRecord) -> Vec<StatRow> {
    record
        .stats
        .iter()
        .map(|s| StatRow {
            stat: capitalize(&humanize(&s.name)),
            base: s.base,
            bar: format!("{} {:.0}%", stat_bar(s.percentage()), s.percentage()),
        })
        .collect()
}

fn build_favorite_rows(favorites: &FavoriteSet) -> Vec<FavoriteRow> {
    favorites
        .ids()
        .iter()
        .map(|id| FavoriteRow {
            number: pokedex_lib::catalog::display_number(*id),
            id: *id,
        })
        .collect()
}

fn stat_bar(percentage: f64) -> String {
    let filled = (percentage.clamp(0.0, 100.0) / 100.0 * STAT_BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(STAT_BAR_WIDTH - filled)
    )
}

/// Header block of the detail view, one line per field.
fn detail_lines(record: &DetailRecord, is_favorite: bool) -> Vec<String> {
    let types = record
        .item
        .categories
        .iter()
        .map(|c| option_label(c))
        .collect::<Vec<_>>()
        .join(", ");
    let abilities = record
        .abilities
        .iter()
        .map(|a| capitalize(&humanize(a)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![format!(
        "{} {}{}",
        record.item.number(),
        record.title(),
        if is_favorite { " ★" } else { "" }
    )];
    lines.push(format!("Types: {}", types));
    lines.push(format!(
        "Height: {:.1} m   Weight: {:.1} kg",
        record.height_m, record.weight_kg
    ));
    lines.push(format!("Abilities: {}", abilities));
    if let Some(url) = &record.item.image_url {
        lines.push(format!("Image: {}", url));
    }
    lines.push(String::new());
    lines.push(record.description.clone());
    lines
}

fn not_found_lines(query: &str, suggestions: &[String]) -> Vec<String> {
    let mut lines = vec![format!("Pokémon not found: {}", query)];
    if !suggestions.is_empty() {
        let names: Vec<String> = suggestions.iter().map(|s| capitalize(s)).collect();
        lines.push(format!("Did you mean: {}?", names.join(", ")));
    }
    lines
}

// -- Listing output --

pub fn print_items_table(entries: &[GridEntry], favorites: &FavoriteSet) {
    println!("{}", Table::new(build_item_rows(entries, favorites)));
}

pub fn print_items_markdown(entries: &[GridEntry], favorites: &FavoriteSet) {
    let mut table = Table::new(build_item_rows(entries, favorites));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_items_csv(entries: &[GridEntry], favorites: &FavoriteSet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_item_rows(entries, favorites) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_items(
    entries: &[GridEntry],
    favorites: &FavoriteSet,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => print_items_table(entries, favorites),
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Csv => print_items_csv(entries, favorites)?,
        OutputFormat::Markdown => print_items_markdown(entries, favorites),
    }
    Ok(())
}

// -- Detail output --

pub fn print_detail_table(record: &DetailRecord, is_favorite: bool) {
    for line in detail_lines(record, is_favorite) {
        println!("{}", line);
    }
    println!();
    println!("{}", Table::new(build_stat_rows(record)));
    println!("Total: {}", record.stat_total());
}

pub fn print_detail_markdown(record: &DetailRecord, is_favorite: bool) {
    let mut lines = detail_lines(record, is_favorite).into_iter();
    if let Some(title) = lines.next() {
        println!("## {}", title);
        println!();
    }
    for line in lines {
        println!("{}", line);
    }
    println!();
    let mut table = Table::new(build_stat_rows(record));
    table.with(Style::markdown());
    println!("{}", table);
    println!();
    println!("**Total:** {}", record.stat_total());
}

pub fn print_stats_csv(record: &DetailRecord) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_stat_rows(record) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_detail(record: &DetailRecord, is_favorite: bool, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_detail_table(record, is_favorite),
        OutputFormat::Json => print_json(record),
        OutputFormat::Csv => print_stats_csv(record)?,
        OutputFormat::Markdown => print_detail_markdown(record, is_favorite),
    }
    Ok(())
}

pub fn print_not_found(query: &str, suggestions: &[String], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&NotFoundView {
            error: "not_found",
            query,
            suggestions,
        }),
        _ => {
            for line in not_found_lines(query, suggestions) {
                println!("{}", line);
            }
        }
    }
}

pub fn print_page_not_found(path: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&NotFoundView {
            error: "page_not_found",
            query: path,
            suggestions: &[],
        }),
        _ => println!("Page not found: {}", path),
    }
}

// -- Favorites output --

pub fn print_favorites(favorites: &FavoriteSet, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(build_favorite_rows(favorites))),
        OutputFormat::Json => print_json(favorites),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in build_favorite_rows(favorites) {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Markdown => {
            let mut table = Table::new(build_favorite_rows(favorites));
            table.with(Style::markdown());
            println!("{}", table);
        }
    }
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
