//! Pressroom - a blog content API

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pressroom::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxArticleRepository, SqlxCategoryRepository, SqlxCommentRepository},
    },
    services::{ArticleService, CategoryService, CommentService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pressroom=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pressroom content API...");

    // Load configuration
    let config = Config::load(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let article_repo = SqlxArticleRepository::boxed(pool.clone());
    let category_repo = SqlxCategoryRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());

    // Initialize services
    let article_service = Arc::new(ArticleService::new(article_repo.clone()));
    let category_service = Arc::new(CategoryService::new(category_repo));
    let comment_service = Arc::new(CommentService::new(comment_repo, article_repo));

    // Build application state
    let state = AppState {
        article_service,
        category_service,
        comment_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
