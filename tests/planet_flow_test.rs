//! End-to-end tests: router + document store on local disk + mocked SWAPI

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mockito::{Matcher, Mock, Server, ServerGuard};
use planets::api::create_planet_router;
use planets::catalog::SwapiClient;
use planets::storage::local::LocalStorage;
use planets::store::DocumentStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot
use url::Url;

struct TestSetup {
    app: Router,
    server: ServerGuard,
    _data_dir: TempDir,
}

async fn test_setup() -> TestSetup {
    let server = Server::new_async().await;
    let data_dir = TempDir::new().unwrap();

    let storage = Arc::new(LocalStorage::new(data_dir.path()).unwrap());
    let store = Arc::new(DocumentStore::new(storage));
    let catalog = Arc::new(
        SwapiClient::new(Url::parse(&server.url()).unwrap(), Duration::from_secs(5)).unwrap(),
    );

    TestSetup {
        app: create_planet_router(store, catalog),
        server,
        _data_dir: data_dir,
    }
}

async fn mock_catalog_planet(server: &mut ServerGuard, name: &str, films: usize) -> Mock {
    let films: Vec<String> = (1..=films)
        .map(|n| format!("https://swapi.dev/api/films/{}/", n))
        .collect();
    let body = json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{
            "name": name,
            "diameter": "12500",
            "gravity": "1 standard",
            "population": "2000000000",
            "climate": "temperate",
            "terrain": "grasslands, mountains",
            "created": "2014-12-10T11:35:48.479000Z",
            "edited": "2014-12-20T20:58:18.420000Z",
            "url": "https://swapi.dev/api/planets/2/",
            "residents": [],
            "films": films,
        }]
    });

    server
        .mock("GET", "/planets/")
        .match_query(Matcher::UrlEncoded("search".into(), name.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|l| l.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, location, bytes.to_vec())
}

async fn create(app: &Router, name: &str, land: &str, weather: &str) -> String {
    let (status, location, _) = request(
        app,
        "POST",
        "/v1/planets",
        Some(json!({ "name": name, "land": land, "weather": weather })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    location.expect("created planet should have a location")
}

#[tokio::test]
async fn create_then_read_round_trip() {
    let mut setup = test_setup().await;
    let mock = mock_catalog_planet(&mut setup.server, "Aldebaran", 2).await;

    let location = create(&setup.app, "Aldebaran", "dessert", "rain").await;
    mock.assert_async().await;

    let id = location.strip_prefix("v1/planets/").unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    let (status, _, body) = request(&setup.app, "GET", &format!("/{}", location), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"Name":"Aldebaran","Weather":"rain","Land":"dessert","AppearanceQuantity":2}"#
    );
}

#[tokio::test]
async fn unknown_planet_is_not_stored() {
    let mut setup = test_setup().await;
    let _mock = setup
        .server
        .mock("GET", "/planets/")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let (status, location, body) = request(
        &setup.app,
        "POST",
        "/v1/planets",
        Some(json!({ "name": "Aldebaran", "land": "dessert", "weather": "rain" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(location.is_none());
    assert!(body.is_empty());

    let (status, _, body) = request(&setup.app, "GET", "/v1/planets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn catalog_failure_surfaces_description() {
    let mut setup = test_setup().await;
    let _mock = setup
        .server
        .mock("GET", "/planets/")
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let (status, _, body) = request(
        &setup.app,
        "POST",
        "/v1/planets",
        Some(json!({ "name": "Aldebaran" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert!(value["description"]
        .as_str()
        .unwrap()
        .starts_with("Catalog error:"));
}

#[tokio::test]
async fn list_filters_by_exact_name() {
    let mut setup = test_setup().await;
    let _hoth = mock_catalog_planet(&mut setup.server, "Hoth", 1).await;
    let _naboo = mock_catalog_planet(&mut setup.server, "Naboo", 4).await;

    create(&setup.app, "Hoth", "ice", "frozen").await;
    create(&setup.app, "Naboo", "grass", "temperate").await;
    create(&setup.app, "Hoth", "tundra", "blizzard").await;

    let (status, _, body) = request(&setup.app, "GET", "/v1/planets", None).await;
    assert_eq!(status, StatusCode::OK);
    let all: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(all.len(), 3);

    let (_, _, body) = request(&setup.app, "GET", "/v1/planets?name=Hoth", None).await;
    let hoth: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(hoth.len(), 2);
    assert!(hoth.iter().all(|p| p["Name"] == "Hoth" && p["AppearanceQuantity"] == 1));
    assert!(hoth.iter().all(|p| p.get("_id").is_none() && p.get("Id").is_none()));

    let (status, _, body) = request(&setup.app, "GET", "/v1/planets?name=Kamino", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn delete_removes_planet_and_is_idempotent() {
    let mut setup = test_setup().await;
    let _mock = mock_catalog_planet(&mut setup.server, "Dagobah", 3).await;

    let location = create(&setup.app, "Dagobah", "swamp", "murky").await;
    let uri = format!("/{}", location);

    for _ in 0..2 {
        let (status, _, body) = request(&setup.app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    let (status, _, body) = request(&setup.app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}
