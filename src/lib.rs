//! Pressroom - a blog content API
//!
//! This library provides the validated article read/write pipeline together
//! with category and comment paths, backed by SQLite.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod validation;
