//! End-to-end tests for the search pipeline against a mocked upstream.
//!
//! Each test mounts geocode, nearby-search, and detail mocks on one
//! `MockServer` and uses `.expect(n)` to pin how many upstream calls the
//! pipeline makes.

use halal_core::{Coordinates, Location, SearchQuery};
use halal_places::{parse_location, search_places, PlacesClient, PlacesError};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, &format!("{}/maps/api", server.uri()))
        .expect("client construction should not fail")
}

fn candidate_json(id: &str, vicinity: &str) -> Value {
    json!({
        "place_id": id,
        "name": format!("Shop {id}"),
        "vicinity": vicinity,
        "geometry": { "location": { "lat": 40.91, "lng": -74.17 } }
    })
}

async fn mount_geocode(server: &MockServer, address: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", address))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "geometry": { "location": { "lat": 40.9168, "lng": -74.1718 } } }]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_nearby(server: &MockServer, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, place_id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("place_id", place_id))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn detail_ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "OK", "result": result }))
}

#[tokio::test]
async fn address_search_geocodes_once_and_merges_details() {
    let server = MockServer::start().await;

    mount_geocode(&server, "Paterson, NJ", 1).await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("location", "40.9168,-74.1718"))
        .and(query_param("radius", "5000"))
        .and(query_param("keyword", "halal meat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [candidate_json("a", "Main St"), candidate_json("b", "Market St")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_detail(
        &server,
        "a",
        detail_ok(json!({
            "formatted_address": "100 Main St, Paterson, NJ",
            "rating": 4.5,
            "user_ratings_total": 40,
            "photos": [{ "photo_reference": "photo-a" }]
        })),
    )
    .await;
    mount_detail(&server, "b", detail_ok(json!({}))).await;

    let query = SearchQuery::new(Location::Address("Paterson, NJ".to_string()));
    let results = search_places(&test_client(&server), &query)
        .await
        .expect("search should succeed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "a");
    assert_eq!(results[0].address, "100 Main St, Paterson, NJ");
    assert_eq!(results[0].rating, Some(4.5));
    assert_eq!(results[0].total_ratings, Some(40));
    let photo_url = results[0].photo_url.as_deref().expect("photo url");
    assert!(photo_url.starts_with(&format!("{}/maps/api/place/photo?", server.uri())));
    assert!(photo_url.contains("photo_reference=photo-a"));
    assert!(photo_url.contains("maxwidth=400"));

    assert_eq!(results[1].address, "Market St", "falls back to vicinity");
    assert!(results[1].photo_url.is_none());
    assert!(results[1].distance.abs() < f64::EPSILON);
    assert_eq!(
        results[1].location,
        Coordinates {
            lat: 40.91,
            lng: -74.17
        }
    );
}

#[tokio::test]
async fn coordinate_location_skips_geocoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("location", "37.77,-122.41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [candidate_json("sf", "Mission St")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_detail(&server, "sf", detail_ok(json!({}))).await;

    let location = parse_location("37.77,-122.41").expect("coordinate pair");
    let results = search_places(&test_client(&server), &SearchQuery::new(location))
        .await
        .expect("search should succeed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "sf");
}

#[tokio::test]
async fn failed_detail_is_dropped_and_order_is_preserved() {
    let server = MockServer::start().await;

    mount_nearby(
        &server,
        json!({
            "status": "OK",
            "results": [
                candidate_json("A", "first"),
                candidate_json("B", "second"),
                candidate_json("C", "third")
            ]
        }),
        1,
    )
    .await;
    mount_detail(&server, "A", detail_ok(json!({}))).await;
    mount_detail(
        &server,
        "B",
        ResponseTemplate::new(200).set_body_json(json!({ "status": "NOT_FOUND" })),
    )
    .await;
    mount_detail(&server, "C", detail_ok(json!({}))).await;

    let query = SearchQuery::new(Location::Coords(Coordinates {
        lat: 40.9,
        lng: -74.1,
    }));
    let results = search_places(&test_client(&server), &query)
        .await
        .expect("per-item failure must not fail the search");

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["A", "C"]);
}

#[tokio::test]
async fn detail_transport_failure_is_dropped_silently() {
    let server = MockServer::start().await;

    mount_nearby(
        &server,
        json!({
            "status": "OK",
            "results": [candidate_json("up", "x"), candidate_json("down", "y")]
        }),
        1,
    )
    .await;
    mount_detail(&server, "up", detail_ok(json!({}))).await;
    mount_detail(&server, "down", ResponseTemplate::new(503)).await;

    let query = SearchQuery::new(Location::Coords(Coordinates {
        lat: 40.9,
        lng: -74.1,
    }));
    let results = search_places(&test_client(&server), &query).await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results.iter().all(|r| r.id != "down"));
}

#[tokio::test]
async fn zero_results_fails_with_fetch_places_message() {
    let server = MockServer::start().await;

    mount_nearby(
        &server,
        json!({ "status": "ZERO_RESULTS", "results": [] }),
        1,
    )
    .await;

    let query = SearchQuery::new(Location::Coords(Coordinates {
        lat: 40.9,
        lng: -74.1,
    }));
    let err = search_places(&test_client(&server), &query)
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::Search { .. }), "got: {err:?}");
    assert_eq!(err.to_string(), "Failed to fetch places");
}

#[tokio::test]
async fn geocode_failure_aborts_before_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_nearby(&server, json!({ "status": "OK", "results": [] }), 0).await;

    let query = SearchQuery::new(Location::Address("zzzz not a place".to_string()));
    let err = search_places(&test_client(&server), &query)
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::Geocode { .. }), "got: {err:?}");
    assert_eq!(err.to_string(), "Failed to geocode address");
}

#[tokio::test]
async fn custom_radius_and_keyword_reach_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("radius", "1200"))
        .and(query_param("keyword", "zabiha butcher"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery::new(Location::Coords(Coordinates {
        lat: 40.9,
        lng: -74.1,
    }))
    .with_radius(1200)
    .with_keyword("zabiha+butcher");

    let results = search_places(&test_client(&server), &query).await.unwrap();
    assert!(results.is_empty());
}
