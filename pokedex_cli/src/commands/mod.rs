//! CLI subcommand implementations.

pub mod browse;
pub mod favorite;
pub mod list;
pub mod open;
pub mod show;

use std::sync::Arc;

use pokedex_lib::{Db, FavoriteSet, FavoritesStore, MemoryStorage, PokedexConfig, StoragePort};

/// Opens the favorites store on the configured SQLite file. If the database
/// cannot be opened, favorites live in memory for this run only.
pub fn open_favorites(cfg: &PokedexConfig) -> Arc<FavoritesStore> {
    let storage: Arc<dyn StoragePort> = match open_db(cfg) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::warn!(
                "Could not open {}: {}; favorites will not be saved",
                cfg.storage_path.display(),
                e
            );
            Arc::new(MemoryStorage::new())
        }
    };
    Arc::new(FavoritesStore::new(storage).with_max_attempts(cfg.favorite_attempts))
}

fn open_db(cfg: &PokedexConfig) -> Result<Db, pokedex_lib::StorageError> {
    let db = Db::open(&cfg.storage_path)?;
    db.init()?;
    Ok(db)
}

/// Current favorites for display; unreadable storage shows as no favorites.
pub fn favorites_for_display(store: &FavoritesStore) -> FavoriteSet {
    store.get().unwrap_or_else(|e| {
        tracing::warn!("Could not read favorites: {}", e);
        FavoriteSet::default()
    })
}
