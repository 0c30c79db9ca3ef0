use crate::errors::{DomainError, TokenError, NOT_AUTHORIZED_MESSAGE};

#[test]
fn test_not_found_message() {
    let err = DomainError::not_found("Service");
    assert_eq!(err.to_string(), "Service not found");
}

#[test]
fn test_forbidden_message() {
    assert_eq!(DomainError::Forbidden.to_string(), NOT_AUTHORIZED_MESSAGE);
}

#[test]
fn test_token_error_bridges_transparently() {
    let err: DomainError = TokenError::InvalidToken.into();
    assert_eq!(err.to_string(), "Invalid token");
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[test]
fn test_persistence_message_keeps_cause() {
    let err = DomainError::persistence("connection refused");
    assert!(err.to_string().contains("connection refused"));
}
