//! Claims carried by access and refresh tokens.

use serde::{Deserialize, Serialize};

/// Token payload.
///
/// An access token carries `access_uuid` and `authorized`, a refresh
/// token carries `refresh_uuid`. Both name the session the token belongs
/// to in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Set on access tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized: Option<bool>,
    /// Access session id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_uuid: Option<String>,
    /// Refresh session id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_uuid: Option<String>,
    /// Subject the token was issued to.
    pub user_id: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
}

/// Which half of a pair a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived token presented on every request.
    Access,
    /// Long-lived, single-use token redeemed for a new pair.
    Refresh,
}

impl Claims {
    /// Claims for an access token.
    pub fn access(user_id: &str, session_id: &str, iat: i64, exp: i64) -> Self {
        Self {
            authorized: Some(true),
            access_uuid: Some(session_id.to_string()),
            refresh_uuid: None,
            user_id: user_id.to_string(),
            exp,
            iat,
        }
    }

    /// Claims for a refresh token.
    pub fn refresh(user_id: &str, session_id: &str, iat: i64, exp: i64) -> Self {
        Self {
            authorized: None,
            access_uuid: None,
            refresh_uuid: Some(session_id.to_string()),
            user_id: user_id.to_string(),
            exp,
            iat,
        }
    }

    /// The token kind, or `None` when the claims name both sessions or neither.
    pub fn kind(&self) -> Option<TokenKind> {
        match (&self.access_uuid, &self.refresh_uuid) {
            (Some(id), None) if !id.is_empty() => Some(TokenKind::Access),
            (None, Some(id)) if !id.is_empty() => Some(TokenKind::Refresh),
            _ => None,
        }
    }

    /// Access session id, present only on well-formed access tokens.
    pub fn access_session(&self) -> Option<&str> {
        match self.kind() {
            Some(TokenKind::Access) if !self.user_id.is_empty() => self.access_uuid.as_deref(),
            _ => None,
        }
    }

    /// Refresh session id, present only on well-formed refresh tokens.
    pub fn refresh_session(&self) -> Option<&str> {
        match self.kind() {
            Some(TokenKind::Refresh) if !self.user_id.is_empty() => self.refresh_uuid.as_deref(),
            _ => None,
        }
    }
}
