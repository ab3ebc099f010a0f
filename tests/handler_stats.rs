mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

async fn shorten(server: &axum_test::TestServer, url: &str, code: &str) {
    server
        .post("/shorturls")
        .add_header("x-access-code", common::ACCESS_CODE)
        .json(&json!({ "url": url, "shortcode": code }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_stats_for_fresh_link() {
    let (server, _clock) = common::setup();
    shorten(&server, "https://example.com", "fresh1").await;

    let response = server
        .get("/shorturls/fresh1")
        .add_header("x-access-code", common::ACCESS_CODE)
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["originalUrl"], "https://example.com");
    assert_eq!(json["shortCode"], "fresh1");
    assert_eq!(json["totalClicks"], 0);
    assert!(json["createdAt"].is_string());
    assert!(json["expiryDate"].is_string());
    assert_eq!(json["clicks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stats_include_clicks_in_order() {
    let (server, clock) = common::setup();
    shorten(&server, "https://example.com", "clicks1").await;

    server
        .get("/clicks1")
        .add_header("referer", "https://news.example.org/")
        .await
        .assert_status(StatusCode::FOUND);

    clock.advance(chrono::Duration::seconds(5));

    server.get("/clicks1").await.assert_status(StatusCode::FOUND);

    let json = server
        .get("/shorturls/clicks1")
        .add_header("x-access-code", common::ACCESS_CODE)
        .await
        .json::<Value>();

    assert_eq!(json["totalClicks"], 2);

    let clicks = json["clicks"].as_array().unwrap();
    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0]["referrer"], "https://news.example.org/");
    assert_eq!(clicks[1]["referrer"], "");
    assert_eq!(clicks[0]["geo"], "Unknown");
    assert!(clicks[0]["timestamp"].as_str().unwrap() < clicks[1]["timestamp"].as_str().unwrap());
}

#[tokio::test]
async fn test_stats_not_found() {
    let (server, _clock) = common::setup();

    let response = server
        .get("/shorturls/missing")
        .add_header("x-access-code", common::ACCESS_CODE)
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_stats_report_expired_links() {
    let (server, clock) = common::setup();

    server
        .post("/shorturls")
        .add_header("x-access-code", common::ACCESS_CODE)
        .json(&json!({ "url": "https://example.com", "shortcode": "old1", "validity": 1 }))
        .await
        .assert_status(StatusCode::CREATED);

    clock.advance(chrono::Duration::seconds(61));

    let response = server
        .get("/shorturls/old1")
        .add_header("x-access-code", common::ACCESS_CODE)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["shortCode"], "old1");
}

#[tokio::test]
async fn test_stats_list_empty() {
    let (server, _clock) = common::setup();

    let response = server
        .get("/shorturls")
        .add_header("x-access-code", common::ACCESS_CODE)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_stats_list_in_creation_order() {
    let (server, _clock) = common::setup();
    shorten(&server, "https://one.example.com", "first").await;
    shorten(&server, "https://two.example.com", "second").await;
    shorten(&server, "https://three.example.com", "third").await;

    server.get("/second").await.assert_status(StatusCode::FOUND);

    let response = server
        .get("/shorturls")
        .add_header("x-access-code", common::ACCESS_CODE)
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let items = json.as_array().unwrap();
    let codes: Vec<&str> = items
        .iter()
        .map(|item| item["shortCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["first", "second", "third"]);
    assert_eq!(items[1]["totalClicks"], 1);
    assert_eq!(items[0]["totalClicks"], 0);
}
