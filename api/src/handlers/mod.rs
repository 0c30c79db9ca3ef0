//! Request handling helpers shared by the route modules

pub mod error;
pub mod extract;

pub use error::{ApiError, INVALID_REQUEST_MESSAGE, INVALID_TOKEN_MESSAGE};
