//! Pokémon detail types returned by `/pokemon/{name}`.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// National dex number.
pub type PokemonID = i64;

/// Full Pokémon record. Only the fields the catalog renders are modelled;
/// everything else in the (large) response is ignored.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Pokemon {
    /// National dex number.
    pub id: PokemonID,

    /// Lowercase API name (e.g. "mr-mime").
    pub name: String,

    /// Height in decimetres.
    pub height: i64,

    /// Weight in hectograms.
    pub weight: i64,

    pub sprites: Sprites,

    /// Type slots, ordered by slot.
    pub types: Vec<PokemonTypeSlot>,

    pub stats: Vec<PokemonStat>,

    pub abilities: Vec<PokemonAbility>,
}

impl Pokemon {
    /// Type names in slot order.
    pub fn type_names(&self) -> Vec<String> {
        let mut slots: Vec<&PokemonTypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.type_.name.clone()).collect()
    }

    /// Official artwork when present, otherwise the default front sprite.
    pub fn image_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PokemonTypeSlot {
    pub slot: i64,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PokemonStat {
    pub base_stat: i64,
    pub effort: i64,
    pub stat: NamedResource,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PokemonAbility {
    pub ability: NamedResource,
    pub is_hidden: bool,
    pub slot: i64,
}
