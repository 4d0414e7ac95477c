//! Catalog records as the views consume them, built from API responses.

use serde::{Deserialize, Serialize};

use pokeapi::types::{NamedResource, Pokemon, PokemonSpecies};

/// Stat value at which a stat bar is drawn full.
pub const STAT_BAR_MAX: i64 = 150;

/// Minimal list entry from the listing endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CatalogStub {
    pub name: String,
    pub url: String,
}

impl From<NamedResource> for CatalogStub {
    fn from(r: NamedResource) -> Self {
        CatalogStub {
            name: r.name,
            url: r.url,
        }
    }
}

/// Grid card data, hydrated from `/pokemon/{name}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    /// Type names in slot order.
    pub categories: Vec<String>,
}

impl From<&Pokemon> for CatalogItem {
    fn from(p: &Pokemon) -> Self {
        CatalogItem {
            id: p.id,
            name: p.name.clone(),
            image_url: p.image_url().map(str::to_string),
            categories: p.type_names(),
        }
    }
}

impl CatalogItem {
    pub fn number(&self) -> String {
        display_number(self.id)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StatValue {
    pub name: String,
    pub base: i64,
}

impl StatValue {
    /// Width of the stat bar, as a percentage capped at 100.
    pub fn percentage(&self) -> f64 {
        stat_percentage(self.base)
    }
}

/// Everything the detail view renders, merged from the Pokémon and species
/// responses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DetailRecord {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub height_m: f64,
    pub weight_kg: f64,
    pub abilities: Vec<String>,
    pub stats: Vec<StatValue>,
    pub description: String,
}

impl DetailRecord {
    /// Merges detail and species responses. `languages` is tried in order;
    /// `placeholder` is used when none of them has a flavor text.
    pub fn from_parts(
        pokemon: &Pokemon,
        species: &PokemonSpecies,
        languages: &[String],
        placeholder: &str,
    ) -> Self {
        let description = languages
            .iter()
            .find_map(|lang| {
                species
                    .flavor_text_for(lang)
                    .filter(|text| !text.trim().is_empty())
            })
            .map(clean_flavor_text)
            .unwrap_or_else(|| placeholder.to_string());

        DetailRecord {
            item: CatalogItem::from(pokemon),
            height_m: pokemon.height as f64 / 10.0,
            weight_kg: pokemon.weight as f64 / 10.0,
            abilities: pokemon
                .abilities
                .iter()
                .map(|a| a.ability.name.clone())
                .collect(),
            stats: pokemon
                .stats
                .iter()
                .map(|s| StatValue {
                    name: s.stat.name.clone(),
                    base: s.base_stat,
                })
                .collect(),
            description,
        }
    }

    pub fn stat_total(&self) -> i64 {
        self.stats.iter().map(|s| s.base).sum()
    }

    pub fn title(&self) -> String {
        capitalize(&self.item.name)
    }
}

/// `#025`-style dex number.
pub fn display_number(id: i64) -> String {
    format!("#{:03}", id)
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// API names use hyphens ("special-attack"); views show the first as a space.
pub fn humanize(name: &str) -> String {
    name.replacen('-', " ", 1)
}

pub fn stat_percentage(value: i64) -> f64 {
    (value as f64 / STAT_BAR_MAX as f64 * 100.0).clamp(0.0, 100.0)
}

fn clean_flavor_text(text: &str) -> String {
    text.replace(['\u{000c}', '\n'], " ")
}
