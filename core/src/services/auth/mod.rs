//! Authentication service module
//!
//! - User registration with bcrypt password hashes
//! - Login issuing access tokens
//! - Logout through the revocation store
//! - Per-request token authentication

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, DUPLICATE_EMAIL_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
