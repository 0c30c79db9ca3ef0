//! # Konnect Core
//!
//! Core business logic and domain layer for the Konnect backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::entities::{
    Claims, Membership, Organization, RevokedToken, Service, ServiceMetadata, ServiceVersion, User,
};
pub use domain::value_objects::{ListQuery, Page};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{
    MemoryStore, OrganizationRepository, RevokedTokenRepository, ServiceRepository,
    ServiceVersionRepository, UserRepository,
};
pub use services::{
    AuthService, AuthServiceConfig, CatalogService, MembershipGate, OrganizationService,
    RevocationReaper, RevocationStore, TokenService, TokenServiceConfig, VersionUpdate,
};
