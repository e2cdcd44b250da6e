//! Demo application.
//!
//! Handlers that end requests from nested helpers by raising signals, used by
//! the binary and the integration tests.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;

pub fn demo_routes() -> Router {
    Router::new()
        .route("/login", get(login))
        .route("/account", get(account))
        .route("/items/{id}", get(get_item))
        .route("/old-items/{id}", get(old_item))
        .route("/checkout", get(checkout))
        .route("/maintenance", get(maintenance))
        .route("/broken", get(broken))
        .route("/misconfigured", get(misconfigured))
        .route("/unserializable", get(unserializable))
}
