//! Application state - shared across all handlers.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{DbConn, DbErr};
use socialapp_core::SocialService;
use socialapp_infra::{
    DatabaseConfig, SqlCommentRepository, SqlLikeRepository, SqlPostRepository, connect,
};

/// Shared application state.
///
/// Holds only the pool handle and the service; no request data lives here.
#[derive(Clone)]
pub struct AppState {
    pub social: SocialService,
    pub db: DbConn,
}

impl AppState {
    /// Connect to the database, optionally migrate it, and wire the repositories.
    pub async fn new(config: &DatabaseConfig, auto_migrate: bool) -> Result<Self, DbErr> {
        let db = connect(config).await?;

        if auto_migrate {
            Migrator::up(&db, None).await?;
            tracing::info!("Database schema is up to date");
        }

        Ok(Self::from_connection(db))
    }

    /// Build the state over an already open connection pool.
    pub fn from_connection(db: DbConn) -> Self {
        let social = SocialService::new(
            Arc::new(SqlPostRepository::new(db.clone())),
            Arc::new(SqlCommentRepository::new(db.clone())),
            Arc::new(SqlLikeRepository::new(db.clone())),
        );

        tracing::info!("Application state initialized");

        Self { social, db }
    }
}
