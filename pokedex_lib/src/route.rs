//! Page routes: `/` (listing) and `/pokemon/{name}` (detail).

use crate::filter::{FilterState, ALL_CATEGORIES, CATEGORY_PARAM, SEARCH_PARAM};
use crate::search::PageLocation;
use crate::validation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`, filtered by the `search` and `type` query parameters.
    Listing(FilterState),
    /// `/pokemon/{name}` with a syntactically valid name or number.
    Detail(String),
    /// Anything else, including `/pokemon/` with a missing or invalid name.
    NotFound,
}

impl Route {
    pub fn parse(path_and_query: &str) -> Route {
        match PageLocation::parse(path_and_query) {
            Ok(location) => Route::from_location(&location),
            Err(_) => Route::NotFound,
        }
    }

    pub fn from_location(location: &PageLocation) -> Route {
        let segments: Vec<&str> = location
            .path()
            .trim_end_matches('/')
            .split('/')
            .skip(1)
            .collect();
        match segments.as_slice() {
            [] => Route::Listing(location.filter_state()),
            ["pokemon", name] => match validation::validate_identifier(name) {
                Ok(name) => Route::Detail(name),
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Listing(filter) => {
                let search = (!filter.search_text.is_empty()).then_some(filter.search_text.as_str());
                let category =
                    (filter.category != ALL_CATEGORIES).then_some(filter.category.as_str());
                PageLocation::root()
                    .with_param(SEARCH_PARAM, search)
                    .with_param(CATEGORY_PARAM, category)
                    .path_and_query()
            }
            Route::Detail(name) => format!("/pokemon/{}", name),
            Route::NotFound => "/404".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_listing() {
        assert_eq!(Route::parse("/"), Route::Listing(FilterState::default()));
        assert_eq!(
            Route::parse("/?search=char&type=fire"),
            Route::Listing(FilterState::new("char", "fire"))
        );
    }

    #[test]
    fn detail_route_normalizes_name() {
        assert_eq!(
            Route::parse("/pokemon/Pikachu"),
            Route::Detail("pikachu".to_string())
        );
        assert_eq!(Route::parse("/pokemon/25/"), Route::Detail("25".to_string()));
    }

    #[test]
    fn unknown_or_invalid_paths_are_not_found() {
        for path in [
            "/pokemon",
            "/pokemon/",
            "/pokemon/pika%20chu",
            "/pokemon/pikachu/moves",
            "/types",
            "pokemon/pikachu",
        ] {
            assert_eq!(Route::parse(path), Route::NotFound, "{}", path);
        }
    }

    #[test]
    fn listing_path_round_trips() {
        let route = Route::Listing(FilterState::new("mr mime", "psychic"));
        let path = route.path();
        assert_eq!(path, "/?search=mr+mime&type=psychic");
        assert_eq!(Route::parse(&path), route);
        assert_eq!(Route::Listing(FilterState::default()).path(), "/");
    }
}
