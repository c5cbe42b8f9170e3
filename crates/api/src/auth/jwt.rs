//! Access tokens and refresh tokens.
//!
//! Access tokens are HS256-signed JWTs carrying [`Claims`]. Refresh tokens
//! are opaque UUIDs; the server keeps only their SHA-256 hex digest in the
//! `sessions` table.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use leadflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Payload of every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id.
    pub sub: DbId,
    pub role: String,
    /// Expiry, UTC Unix seconds.
    pub exp: i64,
    /// Issue time, UTC Unix seconds.
    pub iat: i64,
    /// Random token id.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  |         |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or blank, or a lifetime is not a number.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let lifetime = |key: &str, default: i64| -> i64 {
            std::env::var(key)
                .map(|v| {
                    v.parse()
                        .unwrap_or_else(|_| panic!("{key} must be a valid i64"))
                })
                .unwrap_or(default)
        };

        Self {
            secret,
            access_token_expiry_mins: lifetime("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: lifetime(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_expires_in(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// When a refresh token issued now stops being accepted.
    pub fn refresh_expires_at(&self) -> Timestamp {
        Utc::now() + Duration::days(self.refresh_token_expiry_days)
    }
}

/// Sign an access token for `user_id` with the configured lifetime.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: iat + config.access_expires_in(),
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// A new refresh token as `(plaintext, sha256_hex)`. Only the hash is stored.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_refresh_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
