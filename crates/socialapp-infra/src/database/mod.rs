//! Database connection management and SQL repositories.

mod connections;
pub mod entity;
mod sql_repo;

pub use connections::{DatabaseConfig, connect};
pub use sql_repo::{SqlCommentRepository, SqlLikeRepository, SqlPostRepository};
