//! Category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category title length bounds, in characters
pub mod title_limits {
    pub const MIN: usize = 1;
    pub const MAX: usize = 30;
}

/// Category entity
///
/// Many-to-many with `Article` via the `articles_categories` link table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: i64,
    /// Category title; uniqueness is not a validation concern
    pub title: String,
    /// Creation timestamp
    pub created_date: DateTime<Utc>,
}
