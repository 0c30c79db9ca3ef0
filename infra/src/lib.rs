//! # Infrastructure Layer
//!
//! PostgreSQL implementations of the repository traits declared in
//! `kn_core`, plus connection pool management and embedded migrations.
//!
//! ## Architecture
//!
//! - **Database**: connection pool and migrations using SQLx
//! - **Postgres**: one repository type per aggregate

pub mod database;

pub use database::{
    DatabasePool, PgOrganizationRepository, PgRevokedTokenRepository, PgServiceRepository,
    PgServiceVersionRepository, PgUserRepository,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
