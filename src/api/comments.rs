//! Comment API endpoints
//!
//! Comments are a sub-resource of articles:
//! - GET /api/articles/{id}/comments - List an article's comments
//! - POST /api/articles/{id}/comments - Add a comment
//! - DELETE /api/articles/{id}/comments/{commentId} - Delete a comment

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::Value;

use crate::api::common::{ApiError, AppState};
use crate::api::responses::CommentView;
use crate::services::CommentServiceError;

/// Build the comments router, nested under /api/articles/{id}
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route("/{commentId}", delete(delete_comment))
}

fn map_service_error(error: CommentServiceError) -> ApiError {
    match error {
        CommentServiceError::ArticleNotFound(id) => {
            ApiError::not_found(format!("Article not found: {}", id))
        }
        CommentServiceError::CommentNotFound(id) => {
            ApiError::not_found(format!("Comment not found: {}", id))
        }
        CommentServiceError::Validation(e) => {
            ApiError::with_details("VALIDATION_ERROR", e.describe(), e.details())
        }
        CommentServiceError::Internal(e) => {
            tracing::warn!("Comment persistence failure: {:#}", e);
            ApiError::internal_error(e.to_string())
        }
    }
}

/// GET /api/articles/{id}/comments - List an article's comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    let comments = state
        .comment_service
        .list(article_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// POST /api/articles/{id}/comments - Add a comment to an article
pub async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    let comment = state
        .comment_service
        .create(article_id, &body)
        .await
        .map_err(map_service_error)?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// DELETE /api/articles/{id}/comments/{commentId} - Delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((article_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<CommentView>, ApiError> {
    let comment = state
        .comment_service
        .delete(article_id, comment_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(comment.into()))
}
