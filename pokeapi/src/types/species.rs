//! Species metadata returned by `/pokemon-species/{name}`.

use serde::{Deserialize, Serialize};

use super::NamedResource;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PokemonSpecies {
    pub id: i64,
    pub name: String,
    pub flavor_text_entries: Vec<FlavorText>,
}

/// One game's dex entry text in one language.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
    pub version: Option<NamedResource>,
}

impl PokemonSpecies {
    /// First flavor text written in `language` (e.g. "en"), if any.
    pub fn flavor_text_for(&self, language: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| entry.flavor_text.as_str())
    }
}
