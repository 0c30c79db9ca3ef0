//! # Konnect API
//!
//! actix-web layer: application factory, middleware, request DTOs and
//! route handlers. Exposed as a library so integration tests can build the
//! same `App` the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use state::{AppState, Repositories};
