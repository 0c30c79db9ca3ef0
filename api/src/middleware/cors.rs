//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Preflight cache lifetime in seconds
pub const CORS_MAX_AGE_SECONDS: usize = 86_400;

/// Creates the CORS middleware.
///
/// Any origin is accepted; origin restrictions belong to the ingress in front
/// of the service.
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE_SECONDS)
}
