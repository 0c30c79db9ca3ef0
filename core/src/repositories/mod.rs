//! Repository interfaces plus an in-memory implementation of each

pub mod memory;
pub mod organization;
pub mod service;
pub mod service_version;
pub mod token;
pub mod user;

pub use memory::MemoryStore;
pub use organization::OrganizationRepository;
pub use service::ServiceRepository;
pub use service_version::ServiceVersionRepository;
pub use token::RevokedTokenRepository;
pub use user::UserRepository;
