//! Token pair creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use taskhub_core::config::AuthConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;

use super::claims::Claims;

/// Creates signed access and refresh tokens (HMAC-SHA256).
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: chrono::Duration,
    /// Refresh token lifetime.
    refresh_ttl: chrono::Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A freshly minted access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Subject both tokens were issued to.
    pub subject_id: String,
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Session id embedded in the access token.
    pub access_uuid: String,
    /// Session id embedded in the refresh token.
    pub refresh_uuid: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// An empty secret is a configuration error; tokens are never signed
    /// with an empty key.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if config.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("JWT signing secret is empty"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: chrono::Duration::minutes(config.jwt_access_ttl_minutes as i64),
            refresh_ttl: chrono::Duration::hours(config.jwt_refresh_ttl_hours as i64),
        })
    }

    /// Mints a pair for `subject_id`, each half with a fresh session id.
    ///
    /// Nothing is registered; the caller records the sessions.
    pub fn issue_pair(&self, subject_id: &str) -> AppResult<TokenPair> {
        let now = Utc::now();
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;
        let access_uuid = Uuid::new_v4().to_string();
        let refresh_uuid = Uuid::new_v4().to_string();

        let access_token = self.sign(&Claims::access(
            subject_id,
            &access_uuid,
            now.timestamp(),
            access_expires_at.timestamp(),
        ))?;
        let refresh_token = self.sign(&Claims::refresh(
            subject_id,
            &refresh_uuid,
            now.timestamp(),
            refresh_expires_at.timestamp(),
        ))?;

        Ok(TokenPair {
            subject_id: subject_id.to_string(),
            access_token,
            refresh_token,
            access_uuid,
            refresh_uuid,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Signs an arbitrary claim set.
    pub fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
