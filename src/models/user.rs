//! User model
//!
//! Users exist in the schema as foreign references for articles and
//! comments. Registration, password hashing and token issuance live
//! outside this crate.

use serde::{Deserialize, Serialize};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique e-mail address
    pub email: String,
    /// Stored as provided; hashing is an external collaborator concern
    pub password: String,
    /// Avatar image path
    pub avatar: Option<String>,
}
