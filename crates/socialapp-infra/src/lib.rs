//! # SocialApp Infrastructure
//!
//! Concrete implementations of the ports defined in `socialapp-core`.
//! Storage goes through SeaORM, so the same repositories serve PostgreSQL
//! and SQLite; the backend is picked by the connection URL.

pub mod database;

pub use database::{
    DatabaseConfig, SqlCommentRepository, SqlLikeRepository, SqlPostRepository, connect,
};
