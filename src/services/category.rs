//! Category service

use serde_json::Value;
use std::sync::Arc;

use crate::db::repositories::CategoryRepository;
use crate::models::Category;
use crate::validation::{validate_category, ValidationError};

/// Error types for category service operations
#[derive(Debug, thiserror::Error)]
pub enum CategoryServiceError {
    /// Payload failed field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying store failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Category service
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    /// Create a new category service
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// List all categories ordered by id.
    pub async fn list(&self) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(self.repo.list().await?)
    }

    /// Validate and persist a new category.
    pub async fn create(&self, payload: &Value) -> Result<Category, CategoryServiceError> {
        let validated = validate_category(payload)?;
        Ok(self.repo.create(&validated).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxCategoryRepository;
    use crate::db::{create_test_pool, migrations::run_migrations};
    use serde_json::json;

    async fn service() -> CategoryService {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        CategoryService::new(SqlxCategoryRepository::boxed(pool))
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let service = service().await;
        service.create(&json!({"title": "Movies"})).await.unwrap();

        let categories = service.list().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].title, "Movies");
    }

    #[tokio::test]
    async fn test_invalid_title_is_rejected() {
        let service = service().await;
        let err = service.create(&json!({"title": ""})).await.unwrap_err();
        assert!(matches!(err, CategoryServiceError::Validation(_)));
    }
}
