//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment message length bound, in characters
pub mod message_limits {
    pub const MIN: usize = 20;
}

/// Comment entity
///
/// Owned by exactly one article and removed with it (cascade).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: i64,
    /// Comment text
    pub message: String,
    /// Author user ID; not managed by this crate
    pub author_id: Option<i64>,
    /// Owning article ID
    pub article_id: i64,
    /// Creation timestamp
    pub created_date: DateTime<Utc>,
}
