//! Article model
//!
//! `Article` is the aggregate root of this crate: categories are shared
//! between articles through a link table, comments belong to exactly one
//! article and are deleted with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Comment};

/// Title length bounds, in characters
pub mod title_limits {
    pub const MIN: usize = 30;
    pub const MAX: usize = 250;
}

/// Announce length bounds, in characters
pub mod announce_limits {
    pub const MIN: usize = 30;
    pub const MAX: usize = 250;
}

/// Full text length bound, in characters
pub mod full_text_limits {
    pub const MAX: usize = 1000;
}

/// Article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: i64,
    /// Picture filename, `.jpg` or `.png`
    pub image: Option<String>,
    /// Article title
    pub title: String,
    /// Short announce shown in listings
    pub announce: String,
    /// Full article text
    pub full_text: Option<String>,
    /// Author user ID; not managed by this crate
    pub author_id: Option<i64>,
    /// Creation timestamp, immutable after insert
    pub created_date: DateTime<Utc>,
}

/// An article together with its eagerly loaded associations
#[derive(Debug, Clone)]
pub struct ArticleDetails {
    pub article: Article,
    /// Linked categories, ordered by id
    pub categories: Vec<Category>,
    /// Comments owned by the article, ordered by id
    pub comments: Vec<Comment>,
}
