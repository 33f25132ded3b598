//! Repositories
//!
//! Data access per entity. Each repository is a trait with a SQLx-backed
//! implementation taking the pool as an explicit dependency.

pub mod article;
pub mod category;
pub mod comment;

pub use article::{ArticleRepository, SqlxArticleRepository};
pub use category::{CategoryRepository, SqlxCategoryRepository};
pub use comment::{CommentRepository, SqlxCommentRepository};
