//! Search box and category selector that write the filter into the page location.
//!
//! The location lives in a `watch` channel: this control is the only
//! writer, the grid view subscribes and re-filters on every change. Writes
//! replace the current location in place and keep unrelated query
//! parameters.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use url::Url;

use crate::catalog::capitalize;
use crate::debounce::Debouncer;
use crate::error::PokedexError;
use crate::filter::{FilterState, ALL_CATEGORIES, CATEGORY_PARAM, SEARCH_PARAM};
use crate::validation;

const LOCATION_BASE: &str = "http://localhost/";

/// Path plus query string of the page being viewed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl Default for PageLocation {
    fn default() -> Self {
        Self::root()
    }
}

impl PageLocation {
    /// The listing page with no query.
    pub fn root() -> Self {
        Self {
            url: base_url(),
        }
    }

    /// Parses `/path?query`. Anything that is not an absolute path is rejected.
    pub fn parse(path_and_query: &str) -> Result<Self, PokedexError> {
        if !path_and_query.starts_with('/') || path_and_query.starts_with("//") {
            return Err(PokedexError::InvalidInput(format!(
                "'{}' is not an absolute page path",
                path_and_query
            )));
        }
        let url = base_url()
            .join(path_and_query)
            .map_err(|e| PokedexError::InvalidInput(format!("invalid page path: {}", e)))?;
        Ok(Self { url })
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn filter_state(&self) -> FilterState {
        FilterState::from_url(&self.url)
    }

    /// Listing location with `key` set to `value` (first occurrence replaced
    /// in place, duplicates dropped) or removed when `value` is `None`.
    pub fn with_param(&self, key: &str, value: Option<&str>) -> PageLocation {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut replaced = false;
        for (k, v) in self.url.query_pairs() {
            if k != key {
                pairs.push((k.into_owned(), v.into_owned()));
            } else if let (Some(value), false) = (value, replaced) {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        }
        if let (Some(value), false) = (value, replaced) {
            pairs.push((key.to_string(), value.to_string()));
        }

        let mut url = base_url();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        PageLocation { url }
    }

    /// `/path?query` as it would appear in the address bar.
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_and_query())
    }
}

fn base_url() -> Url {
    Url::parse(LOCATION_BASE).expect("static base URL parses")
}

/// Selector options: "all" followed by at most `cap` category names.
pub fn category_options(categories: &[String], cap: usize) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(categories.iter().take(cap).cloned())
        .collect()
}

pub fn option_label(option: &str) -> String {
    if option == ALL_CATEGORIES {
        "All types".to_string()
    } else {
        capitalize(option)
    }
}

fn write_param(location: &watch::Sender<PageLocation>, key: &str, value: Option<&str>) {
    location.send_if_modified(|current| {
        let next = current.with_param(key, value);
        if next == *current {
            return false;
        }
        tracing::debug!("location {} -> {}", current, next);
        *current = next;
        true
    });
}

pub struct SearchControl {
    location: Arc<watch::Sender<PageLocation>>,
    debouncer: Debouncer<String>,
    search_text: String,
    category: String,
    options: Vec<String>,
}

impl SearchControl {
    /// Builds the control from the current location. Must be called inside a
    /// tokio runtime (the debouncer spawns its timer task).
    pub fn new(
        location: Arc<watch::Sender<PageLocation>>,
        categories: &[String],
        option_cap: usize,
        quiet: Duration,
    ) -> Self {
        let initial = location.borrow().filter_state();
        let writer = Arc::clone(&location);
        let debouncer = Debouncer::new(quiet, move |text: String| {
            let value = (!text.is_empty()).then_some(text.as_str());
            write_param(&writer, SEARCH_PARAM, value);
        });
        Self {
            location,
            debouncer,
            search_text: initial.search_text,
            category: initial.category,
            options: category_options(categories, option_cap),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Updates the search box; the location follows after the quiet period.
    pub fn on_search_input(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.debouncer.call(text.to_string());
    }

    /// Updates the selector and writes the location immediately.
    pub fn on_category_change(&mut self, category: &str) -> Result<(), PokedexError> {
        let category = validation::validate_category(category, &self.options)?;
        let value = (category != ALL_CATEGORIES).then_some(category.as_str());
        write_param(&self.location, CATEGORY_PARAM, value);
        self.category = category;
        Ok(())
    }

    /// Writes a pending search immediately.
    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn control(start: &str) -> (Arc<watch::Sender<PageLocation>>, SearchControl) {
        let (tx, _rx) = watch::channel(PageLocation::parse(start).unwrap());
        let tx = Arc::new(tx);
        let control = SearchControl::new(
            Arc::clone(&tx),
            &names(&["normal", "fire", "water", "electric"]),
            18,
            Duration::from_millis(300),
        );
        (tx, control)
    }

    #[test]
    fn with_param_preserves_other_params() {
        let loc = PageLocation::parse("/?page=2&search=pi").unwrap();
        assert_eq!(
            loc.with_param("type", Some("fire")).path_and_query(),
            "/?page=2&search=pi&type=fire"
        );
        assert_eq!(
            loc.with_param("search", Some("char")).path_and_query(),
            "/?page=2&search=char"
        );
        assert_eq!(loc.with_param("search", None).path_and_query(), "/?page=2");
        assert_eq!(
            PageLocation::root().with_param("search", None).path_and_query(),
            "/"
        );
    }

    #[test]
    fn with_param_collapses_duplicates() {
        let loc = PageLocation::parse("/?type=a&x=1&type=b").unwrap();
        assert_eq!(
            loc.with_param("type", Some("fire")).path_and_query(),
            "/?type=fire&x=1"
        );
    }

    #[test]
    fn parse_rejects_relative_and_external_paths() {
        assert!(PageLocation::parse("pokemon/pikachu").is_err());
        assert!(PageLocation::parse("//evil.example/").is_err());
        assert_eq!(
            PageLocation::parse("/pokemon/pikachu").unwrap().path(),
            "/pokemon/pikachu"
        );
    }

    #[test]
    fn options_are_all_plus_truncated_categories() {
        let many: Vec<String> = (0..21).map(|i| format!("t{}", i)).collect();
        let options = category_options(&many, 18);
        assert_eq!(options.len(), 19);
        assert_eq!(options[0], "all");
        assert_eq!(options[18], "t17");
        assert_eq!(option_label("all"), "All types");
        assert_eq!(option_label("fire"), "Fire");
    }

    #[tokio::test(start_paused = true)]
    async fn control_starts_from_location() {
        let (_tx, control) = control("/?search=pika&type=electric");
        assert_eq!(control.search_text(), "pika");
        assert_eq!(control.category(), "electric");
    }

    #[tokio::test(start_paused = true)]
    async fn search_is_written_after_quiet_period() {
        let (tx, mut control) = control("/");
        let mut rx = tx.subscribe();

        control.on_search_input("p");
        sleep(Duration::from_millis(100)).await;
        control.on_search_input("pi");
        sleep(Duration::from_millis(100)).await;
        control.on_search_input("pik");

        sleep(Duration::from_millis(250)).await;
        assert_eq!(tx.borrow().path_and_query(), "/");
        assert!(!rx.has_changed().unwrap());

        sleep(Duration::from_millis(100)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().path_and_query(), "/?search=pik");
        assert_eq!(control.search_text(), "pik");
    }

    #[tokio::test(start_paused = true)]
    async fn category_is_written_immediately() {
        let (tx, mut control) = control("/?page=3");
        control.on_category_change("Fire").unwrap();
        assert_eq!(tx.borrow().path_and_query(), "/?page=3&type=fire");

        control.on_category_change("all").unwrap();
        assert_eq!(tx.borrow().path_and_query(), "/?page=3");
        assert_eq!(control.category(), "all");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_category_is_rejected_without_writing() {
        let (tx, mut control) = control("/");
        assert!(control.on_category_change("shadow").is_err());
        assert_eq!(tx.borrow().path_and_query(), "/");
        assert_eq!(control.category(), "all");
    }

    #[tokio::test(start_paused = true)]
    async fn pending_search_keeps_category_written_meanwhile() {
        let (tx, mut control) = control("/");
        control.on_search_input("char");
        control.on_category_change("fire").unwrap();
        sleep(Duration::from_millis(400)).await;

        let location = tx.borrow().clone();
        assert_eq!(location.path_and_query(), "/?type=fire&search=char");
        assert_eq!(location.filter_state(), FilterState::new("char", "fire"));
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_search_removes_param() {
        let (tx, mut control) = control("/?search=pika");
        control.on_search_input("");
        control.flush().await;
        assert_eq!(tx.borrow().path_and_query(), "/");
    }
}
