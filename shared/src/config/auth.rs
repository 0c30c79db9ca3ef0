//! Authentication configuration: JWT signing and token revocation cleanup

use serde::{Deserialize, Serialize};

use super::{ConfigError, Environment};

/// Placeholder secret used outside production when `JWT_SECRET` is unset
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// Default access token lifetime
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Default interval between revocation cleanup runs
pub const DEFAULT_CLEANUP_INTERVAL_MINUTES: u64 = 60;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify access tokens
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEVELOPMENT_JWT_SECRET.to_string(),
            access_token_expiry_minutes: DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Resolve the signing secret for the given environment.
    ///
    /// Production refuses to start without a secret. Other environments fall
    /// back to [`DEVELOPMENT_JWT_SECRET`] and log a warning.
    pub fn resolve(secret: Option<String>, environment: Environment) -> Result<Self, ConfigError> {
        match secret.filter(|s| !s.trim().is_empty()) {
            Some(secret) => Ok(Self::new(secret)),
            None if environment.is_production() => Err(ConfigError::Missing("JWT_SECRET")),
            None => {
                tracing::warn!(
                    "JWT_SECRET is not set, using an insecure development secret ({} environment)",
                    environment
                );
                Ok(Self::default())
            }
        }
    }

    /// Check if using the development placeholder secret
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_JWT_SECRET
    }
}

/// Revoked token bookkeeping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Minutes between background cleanup runs
    pub cleanup_interval_minutes: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_minutes: DEFAULT_CLEANUP_INTERVAL_MINUTES,
        }
    }
}

impl RevocationConfig {
    /// Build from the raw `TOKEN_CLEANUP_INTERVAL_MINUTES` value.
    ///
    /// Missing, unparsable, zero or negative values fall back to the default.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let cleanup_interval_minutes = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|minutes| *minutes > 0)
            .map(|minutes| minutes as u64)
            .unwrap_or_else(|| {
                if let Some(value) = raw {
                    tracing::debug!(
                        "ignoring cleanup interval {:?}, using {} minutes",
                        value,
                        DEFAULT_CLEANUP_INTERVAL_MINUTES
                    );
                }
                DEFAULT_CLEANUP_INTERVAL_MINUTES
            });

        Self {
            cleanup_interval_minutes,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation cleanup configuration
    #[serde(default)]
    pub revocation: RevocationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let jwt = JwtConfig::resolve(std::env::var("JWT_SECRET").ok(), environment)?;
        let revocation =
            RevocationConfig::from_raw(std::env::var("TOKEN_CLEANUP_INTERVAL_MINUTES").ok().as_deref());

        Ok(Self { jwt, revocation })
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_minutes, 60);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_resolve_uses_given_secret() {
        let config = JwtConfig::resolve(Some("s3cret".to_string()), Environment::Production).unwrap();
        assert_eq!(config.secret, "s3cret");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_resolve_missing_secret_is_fatal_in_production() {
        let result = JwtConfig::resolve(None, Environment::Production);
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));

        let blank = JwtConfig::resolve(Some("   ".to_string()), Environment::Production);
        assert!(blank.is_err());
    }

    #[test]
    fn test_resolve_missing_secret_falls_back_in_development() {
        let config = JwtConfig::resolve(None, Environment::Development).unwrap();
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_cleanup_interval_parsing() {
        assert_eq!(RevocationConfig::from_raw(Some("5")).cleanup_interval_minutes, 5);
        assert_eq!(RevocationConfig::from_raw(Some(" 15 ")).cleanup_interval_minutes, 15);
    }

    #[test]
    fn test_cleanup_interval_fallbacks() {
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-3"), Some("1.5")] {
            assert_eq!(
                RevocationConfig::from_raw(raw).cleanup_interval_minutes,
                DEFAULT_CLEANUP_INTERVAL_MINUTES,
                "input {:?}",
                raw
            );
        }
    }
}
