//! Data models
//!
//! Entities persisted by the relational store, plus the per-field length
//! bounds the validation layer enforces.

pub mod article;
pub mod category;
pub mod comment;
pub mod user;

pub use article::{Article, ArticleDetails};
pub use category::Category;
pub use comment::Comment;
pub use user::User;
