//! Main authentication service implementation

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;
use crate::services::revocation::RevocationStore;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Message for any failed login, whichever part was wrong
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email/password";

/// Message for a duplicate registration
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";

/// Authentication service: registration, login, logout and per-request checks
pub struct AuthService {
    /// User repository for database operations
    user_repository: Arc<dyn UserRepository>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Blacklist of logged-out tokens
    revocation_store: Arc<RevocationStore>,
    clock: Arc<dyn Clock>,
    config: AuthServiceConfig,
}

impl AuthService {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `revocation_store` - Store of revoked token fingerprints
    /// * `clock` - Time source for entity timestamps
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_service: Arc<TokenService>,
        revocation_store: Arc<RevocationStore>,
        clock: Arc<dyn Clock>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            revocation_store,
            clock,
            config,
        }
    }

    /// Register a new user
    ///
    /// Input format is validated by the caller; this enforces email
    /// uniqueness and stores a bcrypt hash of the password.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Conflict)` - Email already registered
    pub async fn register(&self, email: &str, name: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict {
                message: DUPLICATE_EMAIL_MESSAGE.to_string(),
            });
        }

        let password_hash = self.hash_password(password).await?;
        let user = User::new(email, name.trim(), password_hash, self.clock.now());
        let user = self.user_repository.create(&user).await?;

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Check credentials and issue an access token
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Signed access token
    /// * `Err(DomainError::Unauthorized)` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => return Err(invalid_credentials()),
        };

        if !self.verify_password(password, &user.password_hash).await? {
            warn!("Failed login for user {}", user.id);
            return Err(invalid_credentials());
        }

        let token = self.token_service.issue(user.id, &user.email)?;
        info!("User {} logged in", user.id);
        Ok(token)
    }

    /// Revoke the presented token until its natural expiry
    ///
    /// An already expired token is still recorded, so retries are harmless.
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Token)` - Bad signature or missing claims
    /// * `Err(DomainError::Persistence)` - The revocation could not be stored
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        let claims = self.token_service.extract_claims_unchecked(token)?;
        let user_id = claims.user_uuid().ok_or(TokenError::InvalidToken)?;

        let fingerprint = TokenService::fingerprint(token);
        self.revocation_store
            .record(&fingerprint, user_id, claims.expires_at())
            .await
            .map_err(|e| {
                error!("Failed to revoke token for user {}: {}", user_id, e);
                e
            })?;

        info!("User {} logged out", user_id);
        Ok(())
    }

    /// Validate a bearer token for a protected request
    ///
    /// A revoked token is reported exactly like any other invalid token.
    pub async fn authenticate(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.token_service.validate(token)?;
        if self
            .revocation_store
            .is_revoked(&TokenService::fingerprint(token))
            .await
        {
            return Err(TokenError::InvalidToken);
        }
        Ok(claims)
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }

    async fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?;

        // An unreadable stored hash can never match
        Ok(verified.unwrap_or(false))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> DomainError {
    DomainError::Unauthorized {
        message: INVALID_CREDENTIALS_MESSAGE.to_string(),
    }
}
