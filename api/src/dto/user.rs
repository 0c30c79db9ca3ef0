use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use kn_shared::validation::is_strong_password;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "Please enter the email"),
        email(message = "Please enter a valid email"),
        length(min = 3, max = 100, message = "Email should be between 3 to 100 characters")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Please enter the name"),
        length(min = 2, max = 100, message = "Name should be between 2 to 100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Please enter the password"),
        length(min = 8, max = 100, message = "Password should be between 8 to 100 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Order in which failing fields are reported
    pub const FIELDS: &'static [&'static str] = &["email", "name", "password"];
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "Please enter the email"))]
    pub email: Option<String>,

    #[validate(required(message = "Please enter the password"))]
    pub password: Option<String>,
}

impl LoginRequest {
    pub const FIELDS: &'static [&'static str] = &["email", "password"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        let mut error = ValidationError::new("strong_password");
        error.message = Some(
            "Password must contain at least one uppercase letter, one lowercase letter, and one special character"
                .into(),
        );
        Err(error)
    }
}
