// src/tests/router_tests.rs

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::errors::ServerError;
use crate::router::{handle, App};
use crate::tests::utils::{listing, FakeFeed};
use astra::Body;
use serde_json::{json, Value};
use std::io::Read;

fn make_app(records: Vec<Value>) -> App<FakeFeed> {
    App {
        engine: Engine::new(FakeFeed::new(records), EngineConfig::default()),
        featured_ids: Vec::new(),
    }
}

fn get(path_and_query: &str) -> astra::Request {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(path_and_query)
        .body(Body::empty())
        .unwrap()
}

fn body_json(resp: &mut astra::Response) -> Value {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_records() -> Vec<Value> {
    vec![
        listing("K1", "E1111111", "1 Maple Grove", "Calgary"),
        listing("K2", "E2222222", "2 Birch Road", "Calgary"),
        listing("K3", "E3333333", "3 Maple Grove", "Edmonton"),
    ]
}

#[test]
fn unknown_route_is_not_found() {
    let app = make_app(sample_records());
    let result = handle(get("/nope"), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn listing_requires_id_or_mls() {
    let app = make_app(sample_records());
    let result = handle(get("/listing"), &app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));

    // Blank values count as missing.
    let result = handle(get("/listing?id=&mls="), &app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn listing_by_id_returns_the_record() {
    let app = make_app(sample_records());
    let mut resp = handle(get("/listing?id=K2"), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Access-Control-Allow-Origin").unwrap(),
        "*"
    );

    let body = body_json(&mut resp);
    assert_eq!(body["success"], true);
    assert_eq!(body["listing"]["ListingKey"], "K2");
}

#[test]
fn listing_by_mls_falls_back_when_id_is_blank() {
    let app = make_app(sample_records());
    let mut resp = handle(get("/listing?id=&mls=E3333333"), &app).unwrap();

    let body = body_json(&mut resp);
    assert_eq!(body["listing"]["ListingKey"], "K3");
}

#[test]
fn listing_miss_is_404_with_null_listing() {
    let app = make_app(sample_records());
    let mut resp = handle(get("/listing?id=Z9999999"), &app).unwrap();

    assert_eq!(resp.status(), 404);
    let body = body_json(&mut resp);
    assert_eq!(body["success"], false);
    assert!(body["listing"].is_null());
}

#[test]
fn listings_pages_free_text_matches() {
    let app = make_app(sample_records());
    let mut resp = handle(get("/listings?q=maple&offset=0&limit=10"), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_json(&mut resp);
    assert_eq!(body["totalMatchesSeen"], 2);
    assert_eq!(body["truncated"], false);
    assert_eq!(body["page"][0]["ListingKey"], "K1");
    assert_eq!(body["page"][1]["ListingKey"], "K3");
}

#[test]
fn listings_without_query_returns_a_page_of_everything() {
    let app = make_app(sample_records());
    let mut resp = handle(get("/listings?limit=2"), &app).unwrap();

    let body = body_json(&mut resp);
    assert_eq!(body["page"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalMatchesSeen"], 3);
}

#[test]
fn listings_rejects_garbage_numbers() {
    let app = make_app(sample_records());
    let result = handle(get("/listings?q=maple&offset=abc"), &app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn listings_surface_upstream_failure_as_well_formed_body() {
    let mut feed = FakeFeed::new(sample_records());
    feed.fail_page_calls = (0..10).collect();
    let app = App {
        engine: Engine::new(feed, EngineConfig::default()),
        featured_ids: Vec::new(),
    };

    let mut resp = handle(get("/listings?q=maple"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(&mut resp);
    assert_eq!(body["page"].as_array().unwrap().len(), 0);
    assert_eq!(body["totalMatchesSeen"], 0);
    assert_eq!(body["truncated"], false);
    assert!(body["error"].is_string());
}

#[test]
fn featured_preserves_order_and_drops_misses() {
    let app = make_app(sample_records());
    let mut resp = handle(get("/featured?ids=K3,Z9999999,K1"), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Cache-Control").unwrap(),
        "public, max-age=30, s-maxage=300, stale-while-revalidate=86400"
    );

    let body = body_json(&mut resp);
    assert_eq!(body["success"], true);
    assert_eq!(body["totalMatches"], 2);
    assert_eq!(body["listings"][0]["ListingKey"], "K3");
    assert_eq!(body["listings"][1]["ListingKey"], "K1");
}

#[test]
fn featured_with_no_ids_succeeds_empty() {
    let app = make_app(sample_records());
    let mut resp = handle(get("/featured"), &app).unwrap();

    let body = body_json(&mut resp);
    assert_eq!(body["success"], true);
    assert_eq!(body["totalMatches"], 0);
    assert_eq!(body["listings"].as_array().unwrap().len(), 0);
}

#[test]
fn featured_uses_configured_fallback_ids() {
    let app = App {
        engine: Engine::new(FakeFeed::new(sample_records()), EngineConfig::default()),
        featured_ids: vec!["E2222222".to_string()],
    };

    let mut resp = handle(get("/featured"), &app).unwrap();
    let body = body_json(&mut resp);
    assert_eq!(body["totalMatches"], 1);
    assert_eq!(body["listings"][0]["ListingKey"], "K2");
}

#[test]
fn featured_hides_undisplayable_records() {
    let mut records = sample_records();
    records[0]["InternetDisplayYN"] = json!("N");
    let app = make_app(records);

    let mut resp = handle(get("/featured?ids=K1,K2"), &app).unwrap();
    let body = body_json(&mut resp);
    assert_eq!(body["totalMatches"], 1);
    assert_eq!(body["listings"][0]["ListingKey"], "K2");
}
