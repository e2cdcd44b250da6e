//! End-to-end tests for signals raised inside handlers.

use reqwest::StatusCode;
use response_signal::config::ServerConfig;
use response_signal::demo::demo_routes;
use response_signal::demo::handlers::SESSION_HEADER;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_redirect_to_login() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client().get(server.url("/account")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/login");
}

#[tokio::test]
async fn test_handler_completes_when_nothing_is_raised() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client()
        .get(server.url("/account"))
        .header(SESSION_HEADER, "ada")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"user": "ada"}));
}

#[tokio::test]
async fn test_not_found_json() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client().get(server.url("/items/99")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"error":"Not found"}"#);
}

#[tokio::test]
async fn test_found_item() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client().get(server.url("/items/1")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"id": 1, "name": "kettle", "in_stock": true})
    );
}

#[tokio::test]
async fn test_permanent_redirect() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client().get(server.url("/old-items/1")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "/items/1");
}

#[tokio::test]
async fn test_first_signal_wins() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client()
        .get(server.url("/checkout"))
        .header(SESSION_HEADER, "ada")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(res.headers().get("location").is_none());
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Out of stock", "item": "teapot"})
    );
}

#[tokio::test]
async fn test_custom_signal() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client().get(server.url("/maintenance")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.headers()["retry-after"], "120");
    assert_eq!(res.text().await.unwrap(), "Down for maintenance");
}

#[tokio::test]
async fn test_ordinary_error_forwarded_to_catch_all() {
    let mut config = ServerConfig::default();
    config.errors.expose_details = true;
    let server = common::start_server(config, demo_routes()).await;

    let res = common::client().get(server.url("/broken")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "inventory store unreachable"})
    );
}

#[tokio::test]
async fn test_construction_error_is_an_ordinary_error() {
    let mut config = ServerConfig::default();
    config.errors.expose_details = true;
    let server = common::start_server(config, demo_routes()).await;

    let res = common::client().get(server.url("/misconfigured")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.headers().get("location").is_none());
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("invalid redirect status 299"));
}

#[tokio::test]
async fn test_serialization_failure_reaches_catch_all() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client().get(server.url("/unserializable")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Internal Server Error"})
    );
}

#[tokio::test]
async fn test_request_id_on_terminal_responses() {
    let server = common::start_server(ServerConfig::default(), demo_routes()).await;

    let res = common::client()
        .get(server.url("/account"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["x-request-id"], "trace-me");
}
