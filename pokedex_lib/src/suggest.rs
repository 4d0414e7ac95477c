//! "Did you mean" suggestions for names that did not resolve.

use crate::catalog::CatalogStub;

/// Minimum Jaro-Winkler similarity for a name to be suggested.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Up to `max` stub names closest to `query`, best first.
pub fn suggest_names(query: &str, stubs: &[CatalogStub], max: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = stubs
        .iter()
        .map(|stub| (strsim::jaro_winkler(&query, &stub.name), stub.name.as_str()))
        .filter(|(score, name)| *score >= SUGGESTION_THRESHOLD && *name != query)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(max)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stubs(names: &[&str]) -> Vec<CatalogStub> {
        names
            .iter()
            .map(|n| CatalogStub {
                name: n.to_string(),
                url: String::new(),
            })
            .collect()
    }

    #[test]
    fn typo_suggests_closest_name() {
        let list = stubs(&["pikachu", "raichu", "charmander", "bulbasaur"]);
        let suggestions = suggest_names("pikachuu", &list, 3);
        assert_eq!(suggestions.first().map(String::as_str), Some("pikachu"));
        assert!(!suggestions.contains(&"bulbasaur".to_string()));
    }

    #[test]
    fn unrelated_query_suggests_nothing() {
        let list = stubs(&["pikachu", "charmander"]);
        assert!(suggest_names("zzzzzz", &list, 3).is_empty());
        assert!(suggest_names("  ", &list, 3).is_empty());
    }

    #[test]
    fn respects_max() {
        let list = stubs(&["charmander", "charmeleon", "charizard"]);
        assert_eq!(suggest_names("charmandr", &list, 1).len(), 1);
    }
}
