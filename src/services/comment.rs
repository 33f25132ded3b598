//! Comment service
//!
//! Comments are a sub-resource of articles: every operation checks the
//! owning article first, so a missing article is reported as such rather
//! than as an empty comment set.

use serde_json::Value;
use std::sync::Arc;

use crate::db::repositories::{ArticleRepository, CommentRepository};
use crate::models::Comment;
use crate::validation::{validate_comment, ValidationError};

/// Error types for comment service operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Owning article not found
    #[error("Article not found: {0}")]
    ArticleNotFound(i64),

    /// Comment not found within the article
    #[error("Comment not found: {0}")]
    CommentNotFound(i64),

    /// Payload failed field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying store failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Comment service
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
    article_repo: Arc<dyn ArticleRepository>,
}

impl CommentService {
    /// Create a new comment service
    pub fn new(repo: Arc<dyn CommentRepository>, article_repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo, article_repo }
    }

    async fn require_article(&self, article_id: i64) -> Result<(), CommentServiceError> {
        if self.article_repo.exists(article_id).await? {
            Ok(())
        } else {
            Err(CommentServiceError::ArticleNotFound(article_id))
        }
    }

    /// List the comments of one article.
    pub async fn list(&self, article_id: i64) -> Result<Vec<Comment>, CommentServiceError> {
        self.require_article(article_id).await?;
        Ok(self.repo.list_by_article(article_id).await?)
    }

    /// Validate and persist a new comment on an article.
    pub async fn create(
        &self,
        article_id: i64,
        payload: &Value,
    ) -> Result<Comment, CommentServiceError> {
        self.require_article(article_id).await?;
        let validated = validate_comment(payload)?;
        Ok(self.repo.create(article_id, &validated).await?)
    }

    /// Delete one comment of an article and return it.
    pub async fn delete(
        &self,
        article_id: i64,
        comment_id: i64,
    ) -> Result<Comment, CommentServiceError> {
        self.require_article(article_id).await?;
        self.repo
            .delete(article_id, comment_id)
            .await?
            .ok_or(CommentServiceError::CommentNotFound(comment_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxArticleRepository, SqlxCommentRepository};
    use crate::db::{create_test_pool, migrations::run_migrations};
    use serde_json::json;

    async fn service() -> CommentService {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO articles (id, title, announce) VALUES (1, 'title', 'announce')")
            .execute(&pool)
            .await
            .unwrap();
        CommentService::new(
            SqlxCommentRepository::boxed(pool.clone()),
            SqlxArticleRepository::boxed(pool),
        )
    }

    #[tokio::test]
    async fn test_missing_article_is_reported_first() {
        let service = service().await;
        let err = service.list(9).await.unwrap_err();
        assert!(matches!(err, CommentServiceError::ArticleNotFound(9)));

        // Even with an invalid payload, the missing article wins
        let err = service.create(9, &json!({})).await.unwrap_err();
        assert!(matches!(err, CommentServiceError::ArticleNotFound(9)));
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let service = service().await;
        let comment = service
            .create(1, &json!({"text": "A perfectly valid comment"}))
            .await
            .unwrap();

        assert_eq!(service.list(1).await.unwrap().len(), 1);

        let deleted = service.delete(1, comment.id).await.unwrap();
        assert_eq!(deleted.id, comment.id);

        let err = service.delete(1, comment.id).await.unwrap_err();
        assert!(matches!(err, CommentServiceError::CommentNotFound(_)));
    }

    #[tokio::test]
    async fn test_short_comment_is_rejected() {
        let service = service().await;
        let err = service.create(1, &json!({"text": "too short"})).await.unwrap_err();
        assert!(matches!(err, CommentServiceError::Validation(_)));
    }
}
