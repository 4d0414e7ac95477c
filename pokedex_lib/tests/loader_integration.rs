use std::sync::Arc;
use std::time::Duration;

use pokedex_lib::cache::MemoryCache;
use pokedex_lib::client::Revalidate;
use pokedex_lib::loader::{load_detail, load_listing};
use pokedex_lib::{
    CachedClient, CatalogStub, FilterState, GridController, GridEntry, ListQuery, LoadOutcome,
    PokedexConfig,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../pokeapi/tests/fixtures/{}", name)).unwrap()
}

fn client_for(server: &MockServer) -> CachedClient {
    CachedClient::with_base_url(&server.uri(), MemoryCache::new(Duration::from_secs(300)))
}

async fn mount_json(server: &MockServer, route: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn listing_loads_stubs_and_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "151"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("pokemon_list.json")))
        .mount(&server)
        .await;
    mount_json(&server, "/type", "types.json").await;

    let listing = load_listing(&client_for(&server), &PokedexConfig::default()).await;
    let names: Vec<&str> = listing.stubs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["bulbasaur", "charmander", "squirtle", "pikachu", "mr-mime"]
    );
    assert_eq!(listing.categories.len(), 21);
    assert_eq!(listing.categories[12], "electric");
}

#[tokio::test]
async fn listing_failure_degrades_to_empty_stubs() {
    let server = MockServer::start().await;
    mount_status(&server, "/pokemon", 500).await;
    mount_json(&server, "/type", "types.json").await;

    let listing = load_listing(&client_for(&server), &PokedexConfig::default()).await;
    assert!(listing.stubs.is_empty());
    assert_eq!(listing.categories.len(), 21);
}

#[tokio::test]
async fn types_failure_degrades_to_empty_categories() {
    let server = MockServer::start().await;
    mount_json(&server, "/pokemon", "pokemon_list.json").await;
    mount_status(&server, "/type", 503).await;

    let listing = load_listing(&client_for(&server), &PokedexConfig::default()).await;
    assert_eq!(listing.stubs.len(), 5);
    assert!(listing.categories.is_empty());
}

#[tokio::test]
async fn detail_merges_pokemon_and_species() {
    let server = MockServer::start().await;
    mount_json(&server, "/pokemon/pikachu", "pikachu.json").await;
    mount_json(&server, "/pokemon-species/pikachu", "pikachu_species.json").await;

    let record = load_detail(&client_for(&server), &PokedexConfig::default(), "Pikachu")
        .await
        .expect("pikachu should load");
    assert_eq!(record.item.id, 25);
    assert_eq!(record.item.categories, vec!["electric"]);
    assert_eq!(record.height_m, 0.4);
    assert_eq!(record.weight_kg, 6.0);
    assert_eq!(record.stat_total(), 320);
    // "es" is preferred over "en".
    assert!(record.description.starts_with("Cuanto más potente"));
    assert!(!record.description.contains('\n'));
}

#[tokio::test]
async fn detail_falls_back_to_next_language() {
    let server = MockServer::start().await;
    mount_json(&server, "/pokemon/charmander", "charmander.json").await;
    mount_json(&server, "/pokemon-species/charmander", "charmander_species.json").await;

    let record = load_detail(&client_for(&server), &PokedexConfig::default(), "charmander")
        .await
        .expect("charmander should load");
    assert!(record.description.starts_with("Obviously prefers hot places."));
    assert!(!record.description.contains('\u{000c}'));
}

#[tokio::test]
async fn detail_is_not_found_unless_both_calls_succeed() {
    let cases = [(200, 404), (404, 200), (404, 404), (500, 200)];
    for (pokemon_status, species_status) in cases {
        let server = MockServer::start().await;
        if pokemon_status == 200 {
            mount_json(&server, "/pokemon/pikachu", "pikachu.json").await;
        } else {
            mount_status(&server, "/pokemon/pikachu", pokemon_status).await;
        }
        if species_status == 200 {
            mount_json(&server, "/pokemon-species/pikachu", "pikachu_species.json").await;
        } else {
            mount_status(&server, "/pokemon-species/pikachu", species_status).await;
        }

        let record = load_detail(&client_for(&server), &PokedexConfig::default(), "pikachu").await;
        assert!(
            record.is_none(),
            "pokemon {} / species {} should be not found",
            pokemon_status,
            species_status
        );
    }
}

#[tokio::test]
async fn invalid_identifier_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cfg = PokedexConfig::default();
    for bad in ["", "../type", "pika chu"] {
        assert!(load_detail(&client, &cfg, bad).await.is_none());
    }
}

#[tokio::test]
async fn repeated_detail_loads_hit_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("pikachu.json")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon-species/pikachu"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("pikachu_species.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cfg = PokedexConfig::default();
    let first = load_detail(&client, &cfg, "pikachu").await;
    let second = load_detail(&client, &cfg, "pikachu").await;
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn grid_hydrates_through_cached_client() {
    let server = MockServer::start().await;
    mount_json(&server, "/pokemon/pikachu", "pikachu.json").await;
    mount_json(&server, "/pokemon/charmander", "charmander.json").await;
    mount_status(&server, "/pokemon/missingno", 404).await;

    let grid = GridController::new(Arc::new(client_for(&server)), 50);
    let stubs: Vec<CatalogStub> = ["pikachu", "charmander", "missingno"]
        .iter()
        .map(|name| CatalogStub {
            name: name.to_string(),
            url: format!("{}/pokemon/{}/", server.uri(), name),
        })
        .collect();

    assert!(matches!(grid.load(&stubs).await, LoadOutcome::Applied { .. }));
    let entries = grid.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].item().map(|i| i.id), Some(25));
    assert_eq!(entries[1].item().map(|i| i.id), Some(4));
    assert!(matches!(&entries[2], GridEntry::Failed { name, .. } if name == "missingno"));

    let fire = grid.visible(&FilterState::new("", "fire"));
    assert_eq!(fire.len(), 1);
    assert_eq!(fire[0].name(), "charmander");
    let pika = grid.visible(&FilterState::new("PIKA", "all"));
    assert_eq!(pika.len(), 1);
    assert_eq!(pika[0].name(), "pikachu");
}

#[tokio::test]
async fn expired_revalidation_window_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/type"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("types.json")))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).with_revalidate(Revalidate {
        listing: Duration::from_secs(3600),
        categories: Duration::from_millis(1),
        detail: Duration::from_secs(3600),
    });
    let query = ListQuery::default();
    client.get_types(&query).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let types = client.get_types(&query).await.unwrap();
    assert_eq!(types.results.len(), 21);
}

#[tokio::test]
async fn network_fetch_drops_expired_entries() {
    let server = MockServer::start().await;
    mount_json(&server, "/type", "types.json").await;
    mount_json(&server, "/pokemon/charmander", "charmander.json").await;

    let client = client_for(&server).with_revalidate(Revalidate {
        listing: Duration::from_secs(3600),
        categories: Duration::from_millis(1),
        detail: Duration::from_secs(3600),
    });
    client.get_types(&ListQuery::default()).await.unwrap();
    assert_eq!(client.cached_entries(), 1);
    tokio::time::sleep(Duration::from_millis(10)).await;

    client.get_pokemon("charmander").await.unwrap();
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn unreachable_upstream_degrades_quietly() {
    let client =
        CachedClient::with_base_url("http://127.0.0.1:9", MemoryCache::new(Duration::from_secs(300)));
    let config = PokedexConfig::default();

    let listing = load_listing(&client, &config).await;
    assert!(listing.stubs.is_empty());
    assert!(listing.categories.is_empty());

    assert!(load_detail(&client, &config, "pikachu").await.is_none());
    assert_eq!(client.cached_entries(), 0);
}

#[tokio::test]
async fn cleared_cache_goes_back_to_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/charmander"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("charmander.json")))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.get_pokemon("charmander").await.unwrap();
    client.get_pokemon("charmander").await.unwrap();
    client.clear_cache();
    let charmander = client.get_pokemon("charmander").await.unwrap();
    assert_eq!(charmander.id, 4);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "/pokemon/pikachu", "pikachu.json").await;

    let client = client_for(&server);
    let err = client.get_pokemon("pikachu").await.unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(client.get_pokemon("pikachu").await.unwrap().id, 25);
}
