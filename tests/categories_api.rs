//! Category API end-to-end tests

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{seed_category, spawn_app};

#[tokio::test]
async fn list_returns_empty_array_without_categories() {
    let app = spawn_app().await;

    let res = app.server.get("/api/categories").await;
    res.assert_status_ok();

    let body: Value = res.json();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_returns_categories_in_id_order() {
    let app = spawn_app().await;
    seed_category(&app.pool, 1, "Programming").await;
    seed_category(&app.pool, 2, "Movies").await;

    let res = app.server.get("/api/categories").await;
    res.assert_status_ok();

    let body: Value = res.json();
    assert_eq!(
        body,
        json!([
            {"id": 1, "title": "Programming"},
            {"id": 2, "title": "Movies"},
        ])
    );
}

#[tokio::test]
async fn create_returns_created_category() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/categories")
        .json(&json!({"title": "Hardware"}))
        .await;
    res.assert_status(StatusCode::CREATED);

    let body: Value = res.json();
    assert_eq!(body, json!({"id": 1, "title": "Hardware"}));
}

#[tokio::test]
async fn create_rejects_invalid_title() {
    let app = spawn_app().await;

    let res = app
        .server
        .post("/api/categories")
        .json(&json!({"title": ""}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = app.server.post("/api/categories").json(&json!({})).await;
    res.assert_status(StatusCode::BAD_REQUEST);
}
