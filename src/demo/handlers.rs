use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::signal::{JsonSignal, Outcome, Raised, RedirectSignal, ResponseSignal};

/// Header a logged-in client sends.
pub const SESSION_HEADER: &str = "x-session-user";

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: u32,
    pub name: &'static str,
    pub in_stock: bool,
}

const CATALOG: &[Item] = &[
    Item { id: 1, name: "kettle", in_stock: true },
    Item { id: 2, name: "teapot", in_stock: false },
];

pub async fn login() -> &'static str {
    "Please sign in"
}

pub async fn account(headers: HeaderMap) -> Outcome<Json<serde_json::Value>> {
    let user = current_user(&headers)?;
    Ok(Json(json!({ "user": user })))
}

pub async fn get_item(Path(id): Path<u32>) -> Outcome<Json<Item>> {
    let item = load_item(id)?;
    Ok(Json(item))
}

pub async fn old_item(Path(id): Path<u32>) -> Outcome<()> {
    RedirectSignal::new(format!("/items/{}", id), 301)?.raise()
}

/// Validation fails deep inside; the redirect below is never reached.
pub async fn checkout(headers: HeaderMap) -> Outcome<&'static str> {
    current_user(&headers)?;
    reserve(2)?;
    RedirectSignal::to("/receipt").raise()
}

pub async fn maintenance() -> Outcome<()> {
    ResponseSignal::custom_with_message(
        |_req, sink| {
            sink.set_status(StatusCode::SERVICE_UNAVAILABLE)?;
            sink.set_header(header::RETRY_AFTER, HeaderValue::from_static("120"))?;
            sink.write_body(Bytes::from_static(b"Down for maintenance"))?;
            Ok(())
        },
        "Maintenance window",
    )
    .raise()
}

pub async fn broken() -> Outcome<()> {
    Err(std::io::Error::other("inventory store unreachable").into())
}

/// 299 is not a redirect status; construction fails before anything is raised.
pub async fn misconfigured() -> Outcome<()> {
    RedirectSignal::new("/somewhere", 299)?.raise()
}

pub async fn unserializable() -> Outcome<()> {
    let mut by_pair = BTreeMap::new();
    by_pair.insert((1, 2), "pair keys are not JSON object keys");
    JsonSignal::new(by_pair).raise()
}

fn current_user(headers: &HeaderMap) -> Outcome<String> {
    match headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) {
        Some(user) if !user.is_empty() => Ok(user.to_string()),
        _ => RedirectSignal::to("/login").raise(),
    }
}

fn load_item(id: u32) -> Outcome<Item> {
    find_item(id).ok_or_else(|| {
        Raised::from(JsonSignal::with_status(
            json!({ "error": "Not found" }),
            StatusCode::NOT_FOUND,
        ))
    })
}

fn find_item(id: u32) -> Option<Item> {
    CATALOG.iter().find(|item| item.id == id).cloned()
}

fn reserve(id: u32) -> Outcome<()> {
    let item = load_item(id)?;
    if !item.in_stock {
        return JsonSignal::with_status(
            json!({ "error": "Out of stock", "item": item.name }),
            StatusCode::CONFLICT,
        )
        .raise();
    }
    Ok(())
}
