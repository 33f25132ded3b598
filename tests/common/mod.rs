//! Shared test harness
//!
//! Builds an isolated application instance on an in-memory database and
//! seeds fixture rows directly through the pool, the same state layout
//! each suite needs.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use sqlx::SqlitePool;

use pressroom::api::{build_router, AppState};
use pressroom::db::repositories::{
    SqlxArticleRepository, SqlxCategoryRepository, SqlxCommentRepository,
};
use pressroom::db::{create_test_pool, migrations::run_migrations};
use pressroom::services::{ArticleService, CategoryService, CommentService};

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
}

/// Build a fresh application over an empty, migrated in-memory store.
pub async fn spawn_app() -> TestApp {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    run_migrations(&pool).await.expect("Failed to run migrations");

    let article_repo = SqlxArticleRepository::boxed(pool.clone());
    let category_repo = SqlxCategoryRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());

    let state = AppState {
        article_service: Arc::new(ArticleService::new(article_repo.clone())),
        category_service: Arc::new(CategoryService::new(category_repo)),
        comment_service: Arc::new(CommentService::new(comment_repo, article_repo)),
    };

    let server = TestServer::new(build_router(state, "http://localhost:3000"))
        .expect("Failed to start test server");

    TestApp { server, pool }
}

pub async fn seed_category(pool: &SqlitePool, id: i64, title: &str) {
    sqlx::query("INSERT INTO categories (id, title) VALUES (?, ?)")
        .bind(id)
        .bind(title)
        .execute(pool)
        .await
        .expect("Failed to seed category");
}

pub async fn seed_article(
    pool: &SqlitePool,
    id: i64,
    image: Option<&str>,
    title: &str,
    announce: &str,
    full_text: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO articles (id, image, title, announce, full_text) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(image)
    .bind(title)
    .bind(announce)
    .bind(full_text)
    .execute(pool)
    .await
    .expect("Failed to seed article");
}

pub async fn link_category(pool: &SqlitePool, article_id: i64, category_id: i64) {
    sqlx::query("INSERT INTO articles_categories (article_id, category_id) VALUES (?, ?)")
        .bind(article_id)
        .bind(category_id)
        .execute(pool)
        .await
        .expect("Failed to link category");
}

pub async fn seed_comment(pool: &SqlitePool, id: i64, message: &str, article_id: i64) {
    sqlx::query("INSERT INTO comments (id, message, article_id) VALUES (?, ?, ?)")
        .bind(id)
        .bind(message)
        .bind(article_id)
        .execute(pool)
        .await
        .expect("Failed to seed comment");
}
