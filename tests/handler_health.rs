mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let (server, _clock) = common::setup();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["geoip"]["message"], "Provider: none");
}

#[tokio::test]
async fn test_health_needs_no_access_code() {
    let (server, _clock) = common::setup();

    server
        .get("/health")
        .add_header("x-access-code", "wrong")
        .await
        .assert_status_ok();
}
