//! API layer
//!
//! Route assembly plus the shared state, error envelope, and response
//! shapes used by the endpoint modules.

pub mod articles;
pub mod categories;
pub mod comments;
pub mod common;
pub mod responses;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use common::{ApiError, AppState};

/// Build the API router under /api
fn build_api_router() -> Router<AppState> {
    Router::new()
        .nest("/articles", articles::router())
        .nest("/categories", categories::router())
}

/// Build the complete application router
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000")),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
