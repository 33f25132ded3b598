//! Category API endpoints
//!
//! - GET /api/categories - List all categories
//! - POST /api/categories - Create a new category

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::api::common::{ApiError, AppState};
use crate::api::responses::CategoryView;
use crate::services::CategoryServiceError;

/// Build the categories router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(create_category))
}

fn map_service_error(error: CategoryServiceError) -> ApiError {
    match error {
        CategoryServiceError::Validation(e) => {
            ApiError::with_details("VALIDATION_ERROR", e.describe(), e.details())
        }
        CategoryServiceError::Internal(e) => {
            tracing::warn!("Category persistence failure: {:#}", e);
            ApiError::internal_error(e.to_string())
        }
    }
}

/// GET /api/categories - Ordered list of all categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryView>>, ApiError> {
    let categories = state
        .category_service
        .list()
        .await
        .map_err(map_service_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// POST /api/categories - Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CategoryView>), ApiError> {
    let category = state
        .category_service
        .create(&body)
        .await
        .map_err(map_service_error)?;

    Ok((StatusCode::CREATED, Json(category.into())))
}
