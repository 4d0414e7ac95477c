use pokeapi::{ListQuery, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/api/v2/pokemon").unwrap()
}

#[test]
fn list_query_defaults_add_nothing() {
    let url = ListQuery::default().add_to_url(&base_url());
    assert!(url.query().is_none());
}

#[test]
fn list_query_with_limit() {
    let url = ListQuery::default().with_limit(151).add_to_url(&base_url());
    let query = url.query().unwrap();
    assert_eq!(query, "limit=151");
}

#[test]
fn list_query_with_offset_keeps_limit() {
    let url = ListQuery::default()
        .with_offset(20)
        .with_limit(10)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("limit=10"));
    assert!(query.contains("offset=20"));
}
