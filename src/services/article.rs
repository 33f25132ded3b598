//! Article service
//!
//! Business logic for the article pipeline: payloads are validated before
//! any persistence operation (a validation failure short-circuits with
//! zero side effects), missing targets surface as `NotFound` before any
//! mutation is attempted, and persistence failures propagate upward
//! without retries.

use serde_json::Value;
use std::sync::Arc;

use crate::db::repositories::ArticleRepository;
use crate::models::ArticleDetails;
use crate::validation::{validate_article, ValidationError};

/// Error types for article service operations
#[derive(Debug, thiserror::Error)]
pub enum ArticleServiceError {
    /// Article not found
    #[error("Article not found: {0}")]
    NotFound(i64),

    /// Payload failed field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying store failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A page of articles plus the total quantity across all pages
#[derive(Debug)]
pub struct ArticlePage {
    pub quantity: i64,
    pub articles: Vec<ArticleDetails>,
}

/// Article service
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    /// Create a new article service
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// List a page of articles in insertion order, together with the
    /// total quantity (which reflects the full set, not the page).
    pub async fn list(
        &self,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<ArticlePage, ArticleServiceError> {
        let articles = self.repo.list(offset, limit).await?;
        let quantity = self.repo.count().await?;
        Ok(ArticlePage { quantity, articles })
    }

    /// Get one article with its categories and comments.
    pub async fn get(&self, id: i64) -> Result<ArticleDetails, ArticleServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ArticleServiceError::NotFound(id))
    }

    /// Validate and persist a new article.
    pub async fn create(&self, payload: &Value) -> Result<ArticleDetails, ArticleServiceError> {
        let validated = validate_article(payload)?;
        let details = self.repo.create(&validated).await?;
        Ok(details)
    }

    /// Validate and overwrite an existing article, replacing its category
    /// links. Comments are untouched.
    pub async fn update(
        &self,
        id: i64,
        payload: &Value,
    ) -> Result<ArticleDetails, ArticleServiceError> {
        let validated = validate_article(payload)?;
        self.repo
            .update(id, &validated)
            .await?
            .ok_or(ArticleServiceError::NotFound(id))
    }

    /// Delete an article and return its final representation.
    pub async fn delete(&self, id: i64) -> Result<ArticleDetails, ArticleServiceError> {
        self.repo
            .delete(id)
            .await?
            .ok_or(ArticleServiceError::NotFound(id))
    }
}
