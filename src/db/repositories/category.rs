//! Category repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Category;
use crate::validation::CategoryPayload;

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories ordered by id
    async fn list(&self) -> Result<Vec<Category>>;

    /// Get a category by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Create a new category
    async fn create(&self, payload: &CategoryPayload) -> Result<Category>;
}

/// SQLx-based category repository implementation
pub struct SqlxCategoryRepository {
    pool: SqlitePool,
}

impl SqlxCategoryRepository {
    /// Create a new SQLx category repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn CategoryRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, title, created_date FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list categories")?;

        rows.iter().map(row_to_category).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, title, created_date FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get category by ID")?;

        row.as_ref().map(row_to_category).transpose()
    }

    async fn create(&self, payload: &CategoryPayload) -> Result<Category> {
        let now = Utc::now();
        let result = sqlx::query("INSERT INTO categories (title, created_date) VALUES (?, ?)")
            .bind(&payload.title)
            .bind(now)
            .execute(&self.pool)
            .await
            .context("Failed to create category")?;

        Ok(Category {
            id: result.last_insert_rowid(),
            title: payload.title.clone(),
            created_date: now,
        })
    }
}

fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Result<Category> {
    Ok(Category {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
    })
}
