//! Access token issuance and validation

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Issues and checks HS256 access tokens.
///
/// Holds no state besides the signing key and the injected clock.
pub struct TokenService {
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Signature-only validation; time claims are checked against `clock`
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    /// * `clock` - Time source for `iat`/`exp` and validation
    pub fn new(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        Self {
            config,
            clock,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.config.access_token_expiry_minutes)
    }

    /// Issues a signed access token
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        let claims = Claims::new_access_token(user_id, email, self.clock.now(), self.ttl());
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign access token: {}", e);
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies signature and time claims with zero leeway
    ///
    /// The token is accepted while `nbf <= now < exp`.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::InvalidToken)` - Bad signature, malformed token or
    ///   outside its validity window
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode_signed(token)?;
        if !claims.is_valid_at(self.clock.now()) {
            return Err(TokenError::InvalidToken);
        }
        Ok(claims)
    }

    /// Verifies the signature only, ignoring `exp` and `nbf`
    ///
    /// Only logout should use this, so an expired token can still be revoked.
    pub fn extract_claims_unchecked(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_signed(token)
    }

    /// Lowercase hex SHA-256 of the raw token
    pub fn fingerprint(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    fn decode_signed(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                TokenError::InvalidToken
            })?;

        if claims.user_uuid().is_none() {
            return Err(TokenError::InvalidToken);
        }
        Ok(claims)
    }
}
