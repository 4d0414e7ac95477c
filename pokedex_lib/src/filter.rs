//! Filter state carried in the page location, and the pure filter over grid entries.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::grid::GridEntry;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";
/// Query parameter holding the search text.
pub const SEARCH_PARAM: &str = "search";
/// Query parameter holding the category.
pub const CATEGORY_PARAM: &str = "type";

/// What the grid displays, as encoded in the location's query string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub category: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl FilterState {
    pub fn new(search_text: &str, category: &str) -> Self {
        Self {
            search_text: search_text.to_string(),
            category: if category.is_empty() {
                ALL_CATEGORIES.to_string()
            } else {
                category.to_string()
            },
        }
    }

    /// Reads `search` and `type`; a missing parameter means no filter.
    pub fn from_url(url: &Url) -> Self {
        let mut state = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                SEARCH_PARAM => state.search_text = value.into_owned(),
                CATEGORY_PARAM if !value.is_empty() => state.category = value.into_owned(),
                _ => {}
            }
        }
        state
    }

    /// Case-insensitive substring match on `name`.
    pub fn matches_search(&self, name: &str) -> bool {
        self.search_text.is_empty()
            || name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    pub fn matches_entry(&self, entry: &GridEntry) -> bool {
        if !self.matches_search(entry.name()) {
            return false;
        }
        if self.category == ALL_CATEGORIES {
            return true;
        }
        match entry {
            GridEntry::Loaded(item) => item.has_category(&self.category),
            GridEntry::Failed { .. } => false,
        }
    }

    /// The displayed subset of `entries`, in input order.
    pub fn apply(&self, entries: &[GridEntry]) -> Vec<GridEntry> {
        entries
            .iter()
            .filter(|entry| self.matches_entry(entry))
            .cloned()
            .collect()
    }
}
