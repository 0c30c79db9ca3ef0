use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use kn_shared::validation::is_semver;

/// Body for creating or replacing an organization or a service
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EntityRequest {
    #[validate(
        required(message = "Please enter the name"),
        length(min = 3, max = 100, message = "Name should be between 3 to 100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Please enter the description"),
        length(min = 10, max = 1000, message = "Description should be between 10 to 1000 characters")
    )]
    pub description: Option<String>,
}

impl EntityRequest {
    pub const FIELDS: &'static [&'static str] = &["name", "description"];

    /// Name and description; call after validation succeeded
    pub fn fields(&self) -> (&str, &str) {
        (
            self.name.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersionRequest {
    #[validate(
        required(message = "Please enter the version"),
        custom(function = "validate_semver")
    )]
    pub version: Option<String>,

    #[validate(
        required(message = "Please enter the description"),
        length(min = 10, max = 1000, message = "Description should be between 10 to 1000 characters")
    )]
    pub description: Option<String>,

    pub release_timestamp: Option<DateTime<Utc>>,
}

impl CreateVersionRequest {
    pub const FIELDS: &'static [&'static str] = &["version", "description"];
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVersionRequest {
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description should be between 10 to 1000 characters"
    ))]
    pub description: Option<String>,

    pub release_timestamp: Option<DateTime<Utc>>,
}

impl UpdateVersionRequest {
    pub const FIELDS: &'static [&'static str] = &["description"];
}

fn validate_semver(version: &str) -> Result<(), ValidationError> {
    if is_semver(version) {
        Ok(())
    } else {
        let mut error = ValidationError::new("semver");
        error.message = Some("Version must be a valid semantic version (e.g., 1.0.0, 2.1.3-beta)".into());
        Err(error)
    }
}
