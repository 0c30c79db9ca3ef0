//! Domain entities representing core business objects.

pub mod organization;
pub mod service;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use organization::{Membership, Organization};
pub use service::{Service, ServiceMetadata, ServiceVersion};
pub use token::{Claims, RevokedToken, ACCESS_TOKEN_EXPIRY_MINUTES};
pub use user::User;
