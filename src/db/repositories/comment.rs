//! Comment repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Comment;
use crate::validation::CommentPayload;

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// List the comments of one article ordered by id
    async fn list_by_article(&self, article_id: i64) -> Result<Vec<Comment>>;

    /// Insert a new comment for an article
    async fn create(&self, article_id: i64, payload: &CommentPayload) -> Result<Comment>;

    /// Delete one comment of an article. Returns the deleted comment,
    /// or `None` when no comment matches both ids.
    async fn delete(&self, article_id: i64, comment_id: i64) -> Result<Option<Comment>>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    /// Create a new SQLx comment repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn list_by_article(&self, article_id: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, message, author_id, article_id, created_date
            FROM comments
            WHERE article_id = ?
            ORDER BY id
            "#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments")?;

        rows.iter().map(row_to_comment).collect()
    }

    async fn create(&self, article_id: i64, payload: &CommentPayload) -> Result<Comment> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO comments (message, article_id, created_date) VALUES (?, ?, ?)",
        )
        .bind(&payload.text)
        .bind(article_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            message: payload.text.clone(),
            author_id: None,
            article_id,
            created_date: now,
        })
    }

    async fn delete(&self, article_id: i64, comment_id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r#"
            SELECT id, message, author_id, article_id, created_date
            FROM comments
            WHERE id = ? AND article_id = ?
            "#,
        )
        .bind(comment_id)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get comment")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let comment = row_to_comment(&row)?;

        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;

        Ok(Some(comment))
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        message: row.try_get("message")?,
        author_id: row.try_get("author_id")?,
        article_id: row.try_get("article_id")?,
        created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations::run_migrations};

    async fn repo_with_article() -> SqlxCommentRepository {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO articles (id, title, announce) VALUES (1, 'title', 'announce')")
            .execute(&pool)
            .await
            .unwrap();
        SqlxCommentRepository::new(pool)
    }

    fn payload(text: &str) -> CommentPayload {
        CommentPayload {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let repo = repo_with_article().await;
        repo.create(1, &payload("The first comment on this article"))
            .await
            .unwrap();
        repo.create(1, &payload("Another comment on this article"))
            .await
            .unwrap();

        let comments = repo.list_by_article(1).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, 1);
    }

    #[tokio::test]
    async fn test_delete_requires_matching_article() {
        let repo = repo_with_article().await;
        let comment = repo
            .create(1, &payload("A comment that will be deleted"))
            .await
            .unwrap();

        // Wrong article id deletes nothing
        assert!(repo.delete(2, comment.id).await.unwrap().is_none());

        let deleted = repo.delete(1, comment.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, comment.id);
        assert!(repo.list_by_article(1).await.unwrap().is_empty());
    }
}
