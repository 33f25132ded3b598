//! Database layer
//!
//! Connection pool construction, embedded migrations, and the repository
//! implementations.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
