//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token lifetime (60 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject user ID
    pub user_id: String,

    /// Subject email
    pub email: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Not before (Unix seconds)
    pub nbf: i64,

    /// Expiration (Unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an access token issued at `now`
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `email` - The user's email
    /// * `now` - Issue instant
    /// * `ttl` - Token lifetime
    pub fn new_access_token(user_id: Uuid, email: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = now.timestamp();
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
            nbf: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }

    /// Whether the time claims hold at `now`: `nbf <= now < exp`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let now = now.timestamp();
        self.nbf <= now && now < self.exp
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Parse the subject as a UUID
    pub fn user_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.user_id).ok()
    }
}

/// A logged-out token, kept until its natural expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedToken {
    /// SHA-256 hex fingerprint of the raw token
    pub token_hash: String,

    /// Owner of the token
    pub user_id: Uuid,

    /// Copied from the token's `exp`
    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

impl RevokedToken {
    pub fn new(
        token_hash: impl Into<String>,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_hash: token_hash.into(),
            user_id,
            expires_at,
            created_at,
        }
    }

    /// Whether the record still blocks its token at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
