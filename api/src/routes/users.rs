//! User registration, login and logout
//!
//! None of these routes sit behind `JwtAuth`. Logout reads the bearer token
//! itself so that an already expired token can still be revoked.

use actix_web::{web, HttpRequest, HttpResponse};

use kn_core::errors::DomainError;

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::handlers::error::{ApiError, INVALID_TOKEN_MESSAGE};
use crate::handlers::extract::validate_request;
use crate::middleware::auth::extract_bearer_token;
use crate::state::AppState;

/// Handler for POST /v1/user/register
///
/// # Response
/// - 201 Created: the new user, without password hash
/// - 400 Bad Request: validation failure
/// - 409 Conflict: email already registered
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body, RegisterRequest::FIELDS)?;
    let request = body.into_inner();

    let user = state
        .auth_service
        .register(
            request.email.as_deref().unwrap_or_default(),
            request.name.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create user"))?;

    Ok(HttpResponse::Created().json(user))
}

/// Handler for POST /v1/user/login
///
/// # Response
/// - 200 OK: `{"accessToken": "..."}`
/// - 401 Unauthorized: "Invalid email/password"
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body, LoginRequest::FIELDS)?;

    let access_token = state
        .auth_service
        .login(
            body.email.as_deref().unwrap_or_default(),
            body.password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to generate token"))?;

    Ok(HttpResponse::Ok().json(LoginResponse { access_token }))
}

/// Handler for POST /v1/user/logout
///
/// # Response
/// - 204 No Content: token revoked (or already revoked)
/// - 401 Unauthorized: missing header or bad signature
/// - 500 Internal Server Error: "Failed to logout"
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let token = extract_bearer_token(req.headers())?;

    match state.auth_service.logout(token).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(DomainError::Token(e)) => {
            tracing::debug!("Logout rejected: {}", e);
            Err(ApiError::unauthorized(INVALID_TOKEN_MESSAGE))
        }
        Err(e) => Err(ApiError::from_domain(e, "Failed to logout")),
    }
}
