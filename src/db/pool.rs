//! Database connection pool
//!
//! Creates the SQLite connection pool from configuration. The pool is an
//! explicitly passed dependency: repositories receive it at construction,
//! so tests can build isolated in-memory stores.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Create a SQLite connection pool based on configuration.
///
/// Relative and absolute file paths are accepted as-is; parent directories
/// are created when missing. `:memory:` yields an in-memory database.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let url = &config.url;

    // Ensure the database directory exists for file-based SQLite
    if url != ":memory:" && !url.starts_with("sqlite::memory:") {
        let path = url.strip_prefix("sqlite:").unwrap_or(url);
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {:?}", parent)
                })?;
            }
        }
    }

    // Build the connection URL with create mode for file-based databases
    let connection_url = if url.starts_with("sqlite:") {
        if url.contains('?') {
            url.to_string()
        } else {
            format!("{}?mode=rwc", url)
        }
    } else if url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{}?mode=rwc", url)
    };

    // An in-memory database exists per connection, so the pool must not
    // hand out more than one
    let max_connections = if connection_url.starts_with("sqlite::memory:") {
        1
    } else {
        20
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&connection_url)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    // Cascade deletes rely on foreign keys being enforced
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .context("Failed to enable foreign keys")?;

    Ok(pool)
}

/// Create an in-memory pool for tests.
pub async fn create_test_pool() -> Result<SqlitePool> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
    };
    create_pool(&config).await
}
