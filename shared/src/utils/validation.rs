//! Field validators shared by request DTOs

use once_cell::sync::Lazy;
use regex::Regex;

// Semantic Versioning 2.0.0, including pre-release and build metadata
static SEMVER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("semver pattern is valid")
});

/// Check that a password mixes upper case, lower case and a special character
///
/// Length limits are enforced separately by the caller.
pub fn is_strong_password(password: &str) -> bool {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_special = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    has_upper && has_lower && has_special
}

/// Check that a string is a semantic version such as `1.0.0` or `2.1.3-beta`
pub fn is_semver(version: &str) -> bool {
    SEMVER_REGEX.is_match(version)
}

/// Check if a string length (in characters) is within bounds
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}
