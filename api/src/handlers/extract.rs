//! Extractor configuration and request validation helpers

use actix_web::web;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::error::{ApiError, INVALID_REQUEST_MESSAGE};

/// JSON body extractor config: any parse failure is a 400 "Invalid request"
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected request body: {}", err);
        ApiError::bad_request(INVALID_REQUEST_MESSAGE).into()
    })
}

/// Query string extractor config
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected query string: {}", err);
        ApiError::bad_request(INVALID_REQUEST_MESSAGE).into()
    })
}

/// Parse a path identifier; anything that is not a UUID cannot exist
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(resource))
}

/// Run `validator` rules and report the first failing field in `field_order`.
///
/// Every field message is also returned under `details`.
pub fn validate_request<T: Validate>(request: &T, field_order: &[&str]) -> Result<(), ApiError> {
    match request.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(validation_error(&errors, field_order)),
    }
}

fn validation_error(errors: &ValidationErrors, field_order: &[&str]) -> ApiError {
    let field_errors = errors.field_errors();

    let mut details = Map::new();
    for (field, errs) in &field_errors {
        let messages: Vec<Value> = errs
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| Value::String(m.to_string())))
            .collect();
        details.insert(field.to_string(), Value::Array(messages));
    }

    let message = field_order
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| INVALID_REQUEST_MESSAGE.to_string());

    ApiError::BadRequest {
        message,
        details: Some(Value::Object(details)),
    }
}
