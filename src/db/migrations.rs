//! Database migrations
//!
//! Code-based migrations embedded in the binary as SQL strings. Each
//! migration carries a version and is recorded in `schema_migrations`
//! once applied, so `run_migrations` is idempotent.

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

/// A database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (unique, sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements to apply
    pub up: &'static str,
}

/// All migrations, in application order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_users",
        up: r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE,
                password VARCHAR(255) NOT NULL,
                avatar TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
        "#,
    },
    Migration {
        version: 2,
        name: "create_categories",
        up: r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(30) NOT NULL,
                created_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
    },
    Migration {
        version: 3,
        name: "create_articles",
        up: r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                image TEXT,
                title VARCHAR(250) NOT NULL,
                announce VARCHAR(250) NOT NULL,
                full_text TEXT,
                author_id INTEGER,
                created_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_articles_author_id ON articles(author_id);
        "#,
    },
    Migration {
        version: 4,
        name: "create_comments",
        up: r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                message TEXT NOT NULL,
                author_id INTEGER,
                article_id INTEGER NOT NULL,
                created_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE SET NULL,
                FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_comments_article_id ON comments(article_id);
        "#,
    },
    Migration {
        version: 5,
        name: "create_articles_categories",
        up: r#"
            CREATE TABLE IF NOT EXISTS articles_categories (
                article_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                PRIMARY KEY (article_id, category_id),
                FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE,
                FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_articles_categories_category_id
                ON articles_categories(category_id);
        "#,
    },
];

/// Apply all pending migrations. Returns the number applied.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = applied_versions(pool).await?;

    let mut count = 0;
    for migration in MIGRATIONS {
        if !applied.contains(&migration.version) {
            tracing::info!("Applying migration {}: {}", migration.version, migration.name);
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;
    Ok(())
}

async fn applied_versions(pool: &SqlitePool) -> Result<Vec<i32>> {
    let rows = sqlx::query("SELECT version FROM schema_migrations ORDER BY version")
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?;

    rows.iter()
        .map(|row| row.try_get::<i32, _>("version").context("Invalid version"))
        .collect()
}

async fn apply_migration(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    // Statements are separated by semicolons; sqlx executes one at a time
    for statement in migration
        .up
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed statement in migration {}", migration.name))?;
    }

    sqlx::query("INSERT INTO schema_migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await
        .context("Failed to record migration")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_migrations_apply_once() {
        let pool = create_test_pool().await.unwrap();

        let first = run_migrations(&pool).await.unwrap();
        assert_eq!(first, MIGRATIONS.len());

        let second = run_migrations(&pool).await.unwrap();
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn test_all_tables_exist() {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        for table in [
            "users",
            "categories",
            "articles",
            "comments",
            "articles_categories",
        ] {
            let row = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_optional(&pool)
                .await
                .unwrap();
            assert!(row.is_some(), "table {table} should exist");
        }
    }

    #[tokio::test]
    async fn test_comment_cascade_on_article_delete() {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        sqlx::query("INSERT INTO articles (id, title, announce) VALUES (1, 'title', 'announce')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO comments (message, article_id) VALUES ('a comment', 1)")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query("DELETE FROM articles WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let row = sqlx::query("SELECT id FROM comments WHERE article_id = 1")
            .fetch_optional(&pool)
            .await
            .unwrap();
        assert!(row.is_none(), "comments should cascade");
    }
}
