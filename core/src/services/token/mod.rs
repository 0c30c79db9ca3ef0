//! Token service module for JWT management
//!
//! - HS256 access token issuance and validation
//! - Token fingerprints used as revocation keys

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
