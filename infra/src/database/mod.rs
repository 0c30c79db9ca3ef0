//! Database module - PostgreSQL implementations using SQLx
//!
//! - Connection pool management
//! - Embedded schema migrations
//! - Repository implementations

pub mod connection;
pub mod postgres;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{
    PgOrganizationRepository, PgRevokedTokenRepository, PgServiceRepository,
    PgServiceVersionRepository, PgUserRepository,
};
