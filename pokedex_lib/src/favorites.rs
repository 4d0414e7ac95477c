//! Favorite markers persisted as a JSON array of ids under one storage key.
//!
//! Storage is reached through [`StoragePort`], a key/value interface whose
//! writes are compare-and-swap on a revision token. A toggle reads the set
//! and its revision, writes the updated set against that revision, and
//! starts over from a fresh read when another writer got there first.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::db::StorageError;

/// Storage key holding the favorite set.
pub const FAVORITES_KEY: &str = "pokemonFavorites";

/// A stored value together with the revision it was read at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned {
    pub value: String,
    pub revision: u64,
}

/// Key/value persistence with optimistic concurrency.
pub trait StoragePort: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Versioned>, StorageError>;

    /// Stores `value` only if the key is still at `expected` (`None`: key absent).
    /// Returns `false` when another write happened in between.
    fn write(&self, key: &str, value: &str, expected: Option<u64>) -> Result<bool, StorageError>;
}

/// Process-local storage, used in tests and as a fallback when no database
/// can be opened.
#[derive(Default)]
pub struct MemoryStorage {
    entries: DashMap<String, Versioned>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Versioned>, StorageError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn write(&self, key: &str, value: &str, expected: Option<u64>) -> Result<bool, StorageError> {
        match (self.entries.entry(key.to_string()), expected) {
            (Entry::Vacant(slot), None) => {
                slot.insert(Versioned {
                    value: value.to_string(),
                    revision: 1,
                });
                Ok(true)
            }
            (Entry::Occupied(mut slot), Some(revision)) if slot.get().revision == revision => {
                let next = revision + 1;
                slot.insert(Versioned {
                    value: value.to_string(),
                    revision: next,
                });
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FavoritesError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("stored favorites are not a JSON array of ids: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("favorites changed concurrently {attempts} times in a row")]
    Conflict { attempts: usize },
}

/// Favorite ids in the order they were added.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<i64>);

impl FavoriteSet {
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set with `id` added if absent or removed if present.
    pub fn toggled(&self, id: i64) -> FavoriteSet {
        if self.contains(id) {
            FavoriteSet(self.0.iter().copied().filter(|x| *x != id).collect())
        } else {
            let mut ids = self.0.clone();
            ids.push(id);
            FavoriteSet(ids)
        }
    }
}

impl From<Vec<i64>> for FavoriteSet {
    fn from(ids: Vec<i64>) -> Self {
        FavoriteSet(ids)
    }
}

pub struct FavoritesStore {
    storage: Arc<dyn StoragePort>,
    key: String,
    max_attempts: usize,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            key: FAVORITES_KEY.to_string(),
            max_attempts: 3,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    fn load(&self) -> Result<(FavoriteSet, Option<u64>), FavoritesError> {
        match self.storage.read(&self.key)? {
            None => Ok((FavoriteSet::default(), None)),
            Some(stored) => {
                let set = serde_json::from_str(&stored.value).map_err(FavoritesError::Corrupt)?;
                Ok((set, Some(stored.revision)))
            }
        }
    }

    pub fn get(&self) -> Result<FavoriteSet, FavoritesError> {
        Ok(self.load()?.0)
    }

    pub fn contains(&self, id: i64) -> Result<bool, FavoritesError> {
        Ok(self.get()?.contains(id))
    }

    /// Adds or removes `id`, returning whether it is a favorite afterwards.
    pub fn toggle(&self, id: i64) -> Result<bool, FavoritesError> {
        for attempt in 1..=self.max_attempts {
            let (current, revision) = self.load()?;
            let next = current.toggled(id);
            let json = serde_json::to_string(&next).map_err(FavoritesError::Corrupt)?;
            if self.storage.write(&self.key, &json, revision)? {
                return Ok(next.contains(id));
            }
            tracing::debug!(
                "favorites revision {:?} was replaced under us (attempt {}/{})",
                revision,
                attempt,
                self.max_attempts
            );
        }
        Err(FavoritesError::Conflict {
            attempts: self.max_attempts,
        })
    }
}

/// Per-item favorite button state.
pub struct FavoriteToggle {
    id: i64,
    is_favorite: bool,
    store: Arc<FavoritesStore>,
}

impl FavoriteToggle {
    /// Reads the current membership of `id`.
    pub fn mount(store: Arc<FavoritesStore>, id: i64) -> Result<Self, FavoritesError> {
        let is_favorite = store.contains(id)?;
        Ok(Self {
            id,
            is_favorite,
            store,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Toggles through the store (which re-reads storage first) and adopts
    /// the stored outcome.
    pub fn activate(&mut self) -> Result<bool, FavoritesError> {
        self.is_favorite = self.store.toggle(self.id)?;
        Ok(self.is_favorite)
    }
}
