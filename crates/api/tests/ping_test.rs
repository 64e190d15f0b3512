use std::collections::HashMap;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use cumplebot_api::{config::ApiConfig, router};

#[tokio::test]
async fn test_ping_returns_ok() {
    let server = TestServer::new(router()).unwrap();

    let response = server.get("/ping").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_no_other_routes() {
    let server = TestServer::new(router()).unwrap();

    let response = server.get("/health").expect_failure().await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test]
fn test_config_defaults() {
    let config = ApiConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config.server_addr(), "0.0.0.0:8080");
}

#[test]
fn test_config_overrides_and_rejects_bad_port() {
    let vars: HashMap<&str, &str> = [("API_HOST", "127.0.0.1"), ("PORT", "3000")].into();
    let config = ApiConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
    assert_eq!(config.server_addr(), "127.0.0.1:3000");

    assert!(ApiConfig::from_lookup(|key| (key == "PORT").then(|| "port".to_string())).is_err());
}
