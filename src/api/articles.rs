//! Article API endpoints
//!
//! - GET /api/articles - List articles with pagination
//! - GET /api/articles/{id} - Get one article
//! - POST /api/articles - Create a new article
//! - PUT /api/articles/{id} - Update an article
//! - DELETE /api/articles/{id} - Delete an article

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::comments;
use crate::api::common::{ApiError, AppState};
use crate::api::responses::{ArticleListResponse, ArticleView};
use crate::services::ArticleServiceError;

/// Query parameters for listing articles
#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Build the articles router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles).post(create_article))
        .route(
            "/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .nest("/{id}/comments", comments::router())
}

fn map_service_error(error: ArticleServiceError) -> ApiError {
    match error {
        ArticleServiceError::NotFound(id) => {
            ApiError::not_found(format!("Article not found: {}", id))
        }
        ArticleServiceError::Validation(e) => {
            ApiError::with_details("VALIDATION_ERROR", e.describe(), e.details())
        }
        ArticleServiceError::Internal(e) => {
            tracing::warn!("Article persistence failure: {:#}", e);
            ApiError::internal_error(e.to_string())
        }
    }
}

/// GET /api/articles - List articles with pagination
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListArticlesQuery>,
) -> Result<Json<ArticleListResponse>, ApiError> {
    let offset = query.offset.unwrap_or(0);
    if offset < 0 || query.limit.is_some_and(|limit| limit < 0) {
        return Err(ApiError::validation_error(
            "offset and limit must be non-negative integers",
        ));
    }

    let page = state
        .article_service
        .list(offset, query.limit)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ArticleListResponse {
        quantity: page.quantity,
        articles: page.articles.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/articles/{id} - Get one article with categories and comments
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArticleView>, ApiError> {
    let details = state
        .article_service
        .get(id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(details.into()))
}

/// POST /api/articles - Create a new article
pub async fn create_article(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ArticleView>), ApiError> {
    let details = state
        .article_service
        .create(&body)
        .await
        .map_err(map_service_error)?;

    Ok((StatusCode::CREATED, Json(details.into())))
}

/// PUT /api/articles/{id} - Update an article
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<ArticleView>, ApiError> {
    let details = state
        .article_service
        .update(id, &body)
        .await
        .map_err(map_service_error)?;

    Ok(Json(details.into()))
}

/// DELETE /api/articles/{id} - Delete an article and return it
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArticleView>, ApiError> {
    let details = state
        .article_service
        .delete(id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(details.into()))
}
