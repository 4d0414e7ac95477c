mod meta;
pub use self::meta::{NamedResource, NamedResourceList};

mod pokemon;
pub use self::pokemon::{
    Artwork, OtherSprites, Pokemon, PokemonAbility, PokemonID, PokemonStat, PokemonTypeSlot,
    Sprites,
};

mod species;
pub use self::species::{FlavorText, PokemonSpecies};
