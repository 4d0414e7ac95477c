//! Response cache with a revalidation window per entry.

use std::time::{Duration, Instant};

use dashmap::DashMap;

struct Cached {
    body: String,
    stored_at: Instant,
    max_age: Duration,
}

impl Cached {
    fn is_stale(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.max_age
    }
}

/// Serialized responses keyed by request, shared across tasks.
///
/// An entry is served until it is older than its `max_age`; the first
/// lookup after that drops it so the caller goes back to the network.
pub struct MemoryCache {
    entries: DashMap<String, Cached>,
    default_max_age: Duration,
}

impl MemoryCache {
    pub fn new(default_max_age: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_max_age,
        }
    }

    /// Fresh body for `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_stale(now) {
                return Some(entry.body.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_stale(now));
        None
    }

    pub fn insert(&self, key: String, body: String) {
        self.insert_with_max_age(key, body, self.default_max_age);
    }

    pub fn insert_with_max_age(&self, key: String, body: String, max_age: Duration) {
        self.entries.insert(
            key,
            Cached {
                body,
                stored_at: Instant::now(),
                max_age,
            },
        );
    }

    /// Drops every stale entry; returns how many were removed.
    pub fn purge_stale(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now));
        before - self.entries.len()
    }

    /// Entries held, including stale ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
