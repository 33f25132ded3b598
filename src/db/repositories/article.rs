//! Article repository
//!
//! Database operations for articles, including the category association
//! resolver. Mutating operations run inside a single transaction so the
//! article row and its category links commit together, never a partially
//! linked article.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

use crate::models::{Article, ArticleDetails, Category, Comment};
use crate::validation::{ArticlePayload, CategoryRef};

/// Article repository trait
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// List a page of articles in ascending id order, associations included
    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<ArticleDetails>>;

    /// Count all articles, independent of any page
    async fn count(&self) -> Result<i64>;

    /// Get an article with its categories and comments
    async fn get_by_id(&self, id: i64) -> Result<Option<ArticleDetails>>;

    /// Check whether an article exists
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Insert a new article and link its categories
    async fn create(&self, payload: &ArticlePayload) -> Result<ArticleDetails>;

    /// Overwrite mutable fields and replace category links.
    /// Returns `None` when the article does not exist. Comments are untouched.
    async fn update(&self, id: i64, payload: &ArticlePayload) -> Result<Option<ArticleDetails>>;

    /// Delete an article, cascading its comments and links.
    /// Returns the representation as of just before deletion.
    async fn delete(&self, id: i64) -> Result<Option<ArticleDetails>>;
}

/// SQLx-based article repository implementation
pub struct SqlxArticleRepository {
    pool: SqlitePool,
}

impl SqlxArticleRepository {
    /// Create a new SQLx article repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn ArticleRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<ArticleDetails>> {
        list_articles(&self.pool, offset, limit).await
    }

    async fn count(&self) -> Result<i64> {
        count_articles(&self.pool).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ArticleDetails>> {
        get_article_by_id(&self.pool, id).await
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        article_exists(&self.pool, id).await
    }

    async fn create(&self, payload: &ArticlePayload) -> Result<ArticleDetails> {
        create_article(&self.pool, payload).await
    }

    async fn update(&self, id: i64, payload: &ArticlePayload) -> Result<Option<ArticleDetails>> {
        update_article(&self.pool, id, payload).await
    }

    async fn delete(&self, id: i64) -> Result<Option<ArticleDetails>> {
        delete_article(&self.pool, id).await
    }
}

// ============================================================================
// Queries
// ============================================================================

fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Result<Article> {
    Ok(Article {
        id: row.try_get("id")?,
        image: row.try_get("image")?,
        title: row.try_get("title")?,
        announce: row.try_get("announce")?,
        full_text: row.try_get("full_text")?,
        author_id: row.try_get("author_id")?,
        created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
    })
}

const ARTICLE_COLUMNS: &str = "id, image, title, announce, full_text, author_id, created_date";

async fn list_articles(
    pool: &SqlitePool,
    offset: i64,
    limit: Option<i64>,
) -> Result<Vec<ArticleDetails>> {
    // SQLite treats LIMIT -1 as unbounded, which is the observed contract
    // for a list request without an explicit limit
    let rows = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(limit.unwrap_or(-1))
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list articles")?;

    let mut articles = Vec::with_capacity(rows.len());
    for row in &rows {
        let article = row_to_article(row)?;
        let categories = article_categories(pool, article.id).await?;
        let comments = article_comments(pool, article.id).await?;
        articles.push(ArticleDetails {
            article,
            categories,
            comments,
        });
    }

    Ok(articles)
}

async fn count_articles(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM articles")
        .fetch_one(pool)
        .await
        .context("Failed to count articles")?;
    Ok(row.try_get("count")?)
}

async fn get_article_by_id(pool: &SqlitePool, id: i64) -> Result<Option<ArticleDetails>> {
    let row = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get article by ID")?;

    let Some(row) = row else {
        return Ok(None);
    };

    let article = row_to_article(&row)?;
    let categories = article_categories(pool, id).await?;
    let comments = article_comments(pool, id).await?;

    Ok(Some(ArticleDetails {
        article,
        categories,
        comments,
    }))
}

async fn article_exists(pool: &SqlitePool, id: i64) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM articles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to check article existence")?;
    Ok(row.is_some())
}

async fn article_categories(pool: &SqlitePool, article_id: i64) -> Result<Vec<Category>> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.title, c.created_date
        FROM categories c
        JOIN articles_categories ac ON ac.category_id = c.id
        WHERE ac.article_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
    .context("Failed to load article categories")?;

    rows.iter()
        .map(|row| {
            Ok(Category {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
                created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
            })
        })
        .collect()
}

async fn article_comments(pool: &SqlitePool, article_id: i64) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT id, message, author_id, article_id, created_date
        FROM comments
        WHERE article_id = ?
        ORDER BY id
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
    .context("Failed to load article comments")?;

    rows.iter()
        .map(|row| {
            Ok(Comment {
                id: row.try_get("id")?,
                message: row.try_get("message")?,
                author_id: row.try_get("author_id")?,
                article_id: row.try_get("article_id")?,
                created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
            })
        })
        .collect()
}

async fn create_article(pool: &SqlitePool, payload: &ArticlePayload) -> Result<ArticleDetails> {
    let now = Utc::now();

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        INSERT INTO articles (image, title, announce, full_text, created_date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.image)
    .bind(&payload.title)
    .bind(&payload.announce)
    .bind(&payload.full_text)
    .bind(now)
    .execute(&mut *tx)
    .await
    .context("Failed to create article")?;

    let id = result.last_insert_rowid();
    let categories = replace_category_links(&mut tx, id, &payload.categories).await?;

    tx.commit().await.context("Failed to commit article creation")?;

    Ok(ArticleDetails {
        article: Article {
            id,
            image: payload.image.clone(),
            title: payload.title.clone(),
            announce: payload.announce.clone(),
            full_text: payload.full_text.clone(),
            author_id: None,
            created_date: now,
        },
        categories,
        comments: Vec::new(),
    })
}

async fn update_article(
    pool: &SqlitePool,
    id: i64,
    payload: &ArticlePayload,
) -> Result<Option<ArticleDetails>> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let result = sqlx::query(
        r#"
        UPDATE articles
        SET image = ?, title = ?, announce = ?, full_text = ?
        WHERE id = ?
        "#,
    )
    .bind(&payload.image)
    .bind(&payload.title)
    .bind(&payload.announce)
    .bind(&payload.full_text)
    .bind(id)
    .execute(&mut *tx)
    .await
    .context("Failed to update article")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let categories = replace_category_links(&mut tx, id, &payload.categories).await?;

    let row = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(&mut *tx)
    .await
    .context("Failed to reload updated article")?;
    let article = row_to_article(&row)?;

    tx.commit().await.context("Failed to commit article update")?;

    let comments = article_comments(pool, id).await?;

    Ok(Some(ArticleDetails {
        article,
        categories,
        comments,
    }))
}

async fn delete_article(pool: &SqlitePool, id: i64) -> Result<Option<ArticleDetails>> {
    // Capture the outgoing representation before the cascade removes it
    let Some(details) = get_article_by_id(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete article")?;

    Ok(Some(details))
}

// ============================================================================
// Category association resolver
// ============================================================================

/// Resolve category references to persisted rows and make them the
/// article's exact set of links. Runs inside the caller's transaction.
/// References matching no row are skipped; re-running with the same set
/// yields the same links.
async fn replace_category_links(
    tx: &mut Transaction<'_, Sqlite>,
    article_id: i64,
    refs: &[CategoryRef],
) -> Result<Vec<Category>> {
    sqlx::query("DELETE FROM articles_categories WHERE article_id = ?")
        .bind(article_id)
        .execute(&mut **tx)
        .await
        .context("Failed to clear category links")?;

    let mut ids: Vec<i64> = refs.iter().filter_map(CategoryRef::as_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut categories = Vec::with_capacity(ids.len());
    for category_id in ids {
        let row = sqlx::query("SELECT id, title, created_date FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&mut **tx)
            .await
            .context("Failed to resolve category")?;

        let Some(row) = row else {
            continue;
        };

        sqlx::query("INSERT INTO articles_categories (article_id, category_id) VALUES (?, ?)")
            .bind(article_id)
            .bind(category_id)
            .execute(&mut **tx)
            .await
            .context("Failed to link category")?;

        categories.push(Category {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
        });
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations::run_migrations};
    use crate::models::article::{announce_limits, title_limits};

    async fn repo_with_categories(titles: &[&str]) -> SqlxArticleRepository {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        for title in titles {
            sqlx::query("INSERT INTO categories (title) VALUES (?)")
                .bind(title)
                .execute(&pool)
                .await
                .unwrap();
        }
        SqlxArticleRepository::new(pool)
    }

    fn payload(categories: Vec<CategoryRef>) -> ArticlePayload {
        ArticlePayload {
            image: None,
            title: "t".repeat(title_limits::MIN),
            announce: "a".repeat(announce_limits::MIN),
            full_text: None,
            categories,
        }
    }

    #[tokio::test]
    async fn test_create_links_existing_categories() {
        let repo = repo_with_categories(&["One", "Two"]).await;

        let details = repo
            .create(&payload(vec![CategoryRef::Id(1), CategoryRef::Id(2)]))
            .await
            .unwrap();

        assert_eq!(details.article.id, 1);
        let titles: Vec<_> = details.categories.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
        assert!(details.comments.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_references_are_skipped() {
        let repo = repo_with_categories(&["One"]).await;

        let details = repo
            .create(&payload(vec![CategoryRef::Id(1), CategoryRef::Id(99)]))
            .await
            .unwrap();

        assert_eq!(details.categories.len(), 1);
        assert_eq!(details.categories[0].id, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_links() {
        let repo = repo_with_categories(&["One", "Two"]).await;
        repo.create(&payload(vec![CategoryRef::Id(1)])).await.unwrap();

        let details = repo
            .update(1, &payload(vec![CategoryRef::Id(2)]))
            .await
            .unwrap()
            .expect("article exists");

        let ids: Vec<_> = details.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_update_missing_article_returns_none() {
        let repo = repo_with_categories(&["One"]).await;
        let result = repo.update(42, &payload(vec![CategoryRef::Id(1)])).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_prior_representation() {
        let repo = repo_with_categories(&["One"]).await;
        repo.create(&payload(vec![CategoryRef::Id(1)])).await.unwrap();

        let deleted = repo.delete(1).await.unwrap().expect("article exists");
        assert_eq!(deleted.article.id, 1);
        assert_eq!(deleted.categories.len(), 1);

        assert!(repo.delete(1).await.unwrap().is_none());
        assert!(!repo.exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_pagination_in_insertion_order() {
        let repo = repo_with_categories(&["One"]).await;
        for _ in 0..3 {
            repo.create(&payload(vec![CategoryRef::Id(1)])).await.unwrap();
        }

        let page = repo.list(1, Some(1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].article.id, 2);

        let all = repo.list(0, None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|d| d.article.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
