//! HTTP error type shared by handlers and middleware
//!
//! Every failure renders as `ErrorResponse` with the current request id as
//! `traceId`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::Value;
use thiserror::Error;

use kn_core::errors::{DomainError, NOT_AUTHORIZED_MESSAGE};
use kn_shared::ErrorResponse;

use crate::middleware::trace::current_trace_id;

/// Message for malformed or unparsable request bodies
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

/// Message for tokens that fail validation or were revoked
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Errors returned by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(NOT_AUTHORIZED_MESSAGE.to_string())
    }

    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound(format!("{} not found", resource))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// Category reported in the `type` field
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BadRequest",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::Forbidden(_) => "Forbidden",
            ApiError::NotFound(_) => "NotFound",
            ApiError::Conflict(_) => "Conflict",
            ApiError::Internal(_) => "InternalServerError",
        }
    }

    /// Map a domain error, using `internal_message` for datastore failures
    pub fn from_domain(error: DomainError, internal_message: &str) -> Self {
        match error {
            DomainError::Validation { message } => ApiError::bad_request(message),
            DomainError::NotFound { resource } => ApiError::not_found(&resource),
            DomainError::Conflict { message } => ApiError::Conflict(message),
            DomainError::Forbidden => ApiError::forbidden(),
            DomainError::Unauthorized { message } => ApiError::Unauthorized(message),
            DomainError::Token(_) => ApiError::unauthorized(INVALID_TOKEN_MESSAGE),
            DomainError::Persistence { .. } | DomainError::Internal { .. } => {
                tracing::error!("{}: {}", internal_message, error);
                ApiError::internal(internal_message)
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::from_domain(error, "Something went wrong, please try again later")
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = ErrorResponse::new(self.error_type(), self.to_string())
            .with_trace_id(current_trace_id().unwrap_or_default());
        if let ApiError::BadRequest {
            details: Some(details),
            ..
        } = self
        {
            body = body.with_details(details.clone());
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
