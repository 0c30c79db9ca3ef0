//! Business services containing domain logic and use cases.

pub mod auth;
pub mod catalog;
pub mod membership;
pub mod organization;
pub mod revocation;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use catalog::{CatalogService, VersionUpdate};
pub use membership::MembershipGate;
pub use organization::OrganizationService;
pub use revocation::{RevocationReaper, RevocationStore};
pub use token::{TokenService, TokenServiceConfig};
