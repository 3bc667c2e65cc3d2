//! Session lifecycle: sign-in, refresh rotation and sign-out.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::traits::PasswordHashing;
use taskhub_database::UserStore;
use taskhub_entity::user::User;

use crate::account::normalize_email;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use crate::timeout::bounded;

use super::registry::SessionRegistry;

/// Returned for both an unknown email and a wrong password.
const BAD_CREDENTIALS: &str = "Your email or password is incorrect";

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    /// The authenticated user.
    pub user: User,
    /// Registered token pair.
    pub tokens: TokenPair,
}

/// Drives the credential lifecycle against the registry.
#[derive(Debug, Clone)]
pub struct SessionManager {
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    registry: Arc<SessionRegistry>,
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHashing>,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        registry: Arc<SessionRegistry>,
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHashing>,
    ) -> Self {
        Self {
            encoder,
            decoder,
            registry,
            users,
            hasher,
        }
    }

    /// Authenticates by email and password, then issues and registers a pair.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInOutcome> {
        let email = normalize_email(email);
        let user = bounded(
            self.registry.timeout(),
            "user lookup",
            self.users.find_by_email(&email),
        )
        .await?
        .ok_or_else(|| AppError::forbidden(BAD_CREDENTIALS))?;

        let matches = self
            .hasher
            .verify_password(password, &user.password_hash)
            .unwrap_or_else(|e| {
                error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                false
            });
        if !matches {
            return Err(AppError::forbidden(BAD_CREDENTIALS));
        }

        let subject_id = user.id.to_string();
        let tokens = self.encoder.issue_pair(&subject_id).map_err(|e| {
            error!(user_id = %user.id, error = %e, "Token minting failed");
            AppError::unprocessable("Unable to create credentials")
        })?;
        self.registry.register(&subject_id, &tokens).await?;

        info!(user_id = %user.id, session_id = %tokens.access_uuid, "Sign-in successful");
        Ok(SignInOutcome { user, tokens })
    }

    /// Redeems a refresh token for a new pair.
    ///
    /// The refresh session is revoked before anything is issued, so a
    /// refresh token can be redeemed once.
    pub async fn rotate(&self, refresh_token: Option<&str>) -> AppResult<TokenPair> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Missing refresh token"))?;

        let verified = self.decoder.verify(token, false).map_err(|rejection| {
            debug!(reason = %rejection, "Refresh token rejected");
            AppError::authentication("Expired or invalid refresh token supplied")
        })?;

        let claims = verified.claims;
        let session_id = claims
            .refresh_session()
            .ok_or_else(|| AppError::unprocessable("Unable to read refresh token claims"))?;

        if self.registry.revoke(session_id).await? == 0 {
            warn!(user_id = %claims.user_id, session_id, "Refresh token replayed or revoked");
            return Err(AppError::authentication("Unauthorized"));
        }

        let tokens = self.encoder.issue_pair(&claims.user_id).map_err(|e| {
            error!(user_id = %claims.user_id, error = %e, "Token minting failed");
            AppError::forbidden("Unable to create credentials")
        })?;
        self.registry.register(&claims.user_id, &tokens).await?;

        info!(
            user_id = %claims.user_id,
            revoked_session = session_id,
            session_id = %tokens.access_uuid,
            "Rotated refresh token"
        );
        Ok(tokens)
    }

    /// Revokes the caller's sessions.
    ///
    /// The access token may be expired. Finding nothing to revoke for an
    /// unexpired access token is an error. The refresh session is revoked
    /// too when the refresh token belongs to the same subject.
    pub async fn sign_out(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> AppResult<()> {
        let token = access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Missing access token"))?;

        let verified = self.decoder.verify(token, true)?;
        let claims = &verified.claims;
        let session_id = claims
            .access_session()
            .ok_or_else(|| AppError::authentication("Unauthorized"))?;

        let removed = self.registry.revoke(session_id).await?;
        self.revoke_refresh(&claims.user_id, refresh_token).await;

        if removed == 0 && !verified.is_expired() {
            warn!(user_id = %claims.user_id, session_id, "Sign-out found no live session");
            return Err(AppError::authentication("Error removing entry"));
        }

        info!(user_id = %claims.user_id, session_id, "Signed out");
        Ok(())
    }

    async fn revoke_refresh(&self, user_id: &str, refresh_token: Option<&str>) {
        let Some(token) = refresh_token.filter(|t| !t.is_empty()) else {
            return;
        };

        let verified = match self.decoder.verify(token, true) {
            Ok(verified) => verified,
            Err(rejection) => {
                debug!(reason = %rejection, "Ignoring unusable refresh token on sign-out");
                return;
            }
        };
        if verified.claims.user_id != user_id {
            warn!(user_id, "Refresh token on sign-out belongs to another subject");
            return;
        }
        let Some(session_id) = verified.claims.refresh_session() else {
            return;
        };

        match self.registry.revoke(session_id).await {
            Ok(removed) => debug!(user_id, session_id, removed, "Revoked refresh session"),
            Err(e) => warn!(user_id, session_id, error = %e, "Failed to revoke refresh session"),
        }
    }
}
