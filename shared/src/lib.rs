//! Shared utilities and common types for the Konnect server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Pagination, sorting and error response bodies
//! - Field validators used by request DTOs

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, RevocationConfig, ServerConfig, StorageBackend,
};
pub use types::{
    ErrorResponse, HealthResponse, PageMeta, PaginatedResponse, Pagination, SortOrder, SortParams,
};
pub use utils::validation;
