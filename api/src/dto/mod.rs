//! Request and response bodies

pub mod catalog;
pub mod query;
pub mod user;

pub use catalog::{CreateVersionRequest, EntityRequest, UpdateVersionRequest};
pub use query::ListParams;
pub use user::{LoginRequest, LoginResponse, RegisterRequest};
