//! Shared API response types
//!
//! The outward-facing shapes. Only the enumerated fields ever appear:
//! internal timestamps, foreign keys, and any extraneous client fields
//! are stripped here on the way out.

use serde::{Deserialize, Serialize};

use crate::models::{ArticleDetails, Category, Comment};

/// Externally exposed article representation
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleView {
    pub id: i64,
    pub image: Option<String>,
    pub title: String,
    pub announce: String,
    #[serde(rename = "fullText")]
    pub full_text: Option<String>,
    pub categories: Vec<CategoryView>,
    pub comments: Vec<CommentView>,
}

/// Category info embedded in article and listing responses
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryView {
    pub id: i64,
    pub title: String,
}

/// Comment info embedded in article responses; author and article
/// back-references are dropped
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommentView {
    pub id: i64,
    pub message: String,
}

/// List endpoint wrapper: the quantity reflects the full set, not the page
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleListResponse {
    pub quantity: i64,
    pub articles: Vec<ArticleView>,
}

impl From<ArticleDetails> for ArticleView {
    fn from(details: ArticleDetails) -> Self {
        Self {
            id: details.article.id,
            image: details.article.image,
            title: details.article.title,
            announce: details.article.announce,
            full_text: details.article.full_text,
            categories: details.categories.into_iter().map(Into::into).collect(),
            comments: details.comments.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
        }
    }
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
        }
    }
}
