//! Business services
//!
//! Services sit between the API handlers and the repositories: they run
//! validation before any persistence operation and translate missing rows
//! into typed errors.

pub mod article;
pub mod category;
pub mod comment;

pub use article::{ArticleService, ArticleServiceError};
pub use category::{CategoryService, CategoryServiceError};
pub use comment::{CommentService, CommentServiceError};
