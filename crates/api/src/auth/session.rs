//! Session tokens and OAuth `state` values.
//!
//! Both are HS256 JWTs signed with the session secret. Session tokens carry
//! the user id; state tokens carry a nonce and a purpose marker and live for
//! a few minutes, long enough for one round trip through the consent screen.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stitchflow_core::types::DbId;
use uuid::Uuid;

/// Fallback secret for local development only.
const DEV_SECRET: &str = "stitchflow_secret_key";
/// Default session lifetime in hours (one week).
const DEFAULT_EXPIRY_HOURS: i64 = 168;
/// OAuth state lifetime in seconds.
const STATE_TTL_SECS: i64 = 600;
const STATE_PURPOSE: &str = "oauth_state";

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateClaims {
    nonce: String,
    purpose: String,
    exp: i64,
}

/// Signing configuration for session and state tokens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret.
    pub secret: String,
    /// Session token lifetime in hours.
    pub expiry_hours: i64,
}

impl SessionConfig {
    /// Load from the environment.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `SESSION_SECRET`       | `stitchflow_secret_key` |
    /// | `SESSION_EXPIRY_HOURS` | `168`                   |
    pub fn from_env() -> Self {
        let secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("SESSION_SECRET not set, using the development secret");
                DEV_SECRET.to_string()
            }
        };

        let expiry_hours: i64 = std::env::var("SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }
}

/// Issue a session token for `user_id`.
pub fn issue_session_token(
    user_id: DbId,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + config.expiry_hours * 3600,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Issue a short-lived, signed OAuth `state` value.
pub fn issue_oauth_state(config: &SessionConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = StateClaims {
        nonce: Uuid::new_v4().simple().to_string(),
        purpose: STATE_PURPOSE.to_string(),
        exp: chrono::Utc::now().timestamp() + STATE_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check that `state` was issued by [`issue_oauth_state`] and has not expired.
pub fn verify_oauth_state(state: &str, config: &SessionConfig) -> bool {
    decode::<StateClaims>(
        state,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .is_ok_and(|data| data.claims.purpose == STATE_PURPOSE)
}
