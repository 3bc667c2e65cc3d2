//! Per-request authorization.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;

use crate::jwt::JwtDecoder;
use crate::session::SessionRegistry;

/// Identity established for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSubject {
    /// Subject the registry resolved the session to.
    pub user_id: String,
    /// Access session the request was made under.
    pub session_id: String,
}

/// Admits a request only if its access token verifies and its session is
/// still registered.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    decoder: Arc<JwtDecoder>,
    registry: Arc<SessionRegistry>,
}

impl AuthorizationGate {
    /// Creates a gate over the given verifier and registry.
    pub fn new(decoder: Arc<JwtDecoder>, registry: Arc<SessionRegistry>) -> Self {
        Self { decoder, registry }
    }

    /// Runs the checks in order, stopping at the first failure:
    ///
    /// 1. a token is present (`Authentication`)
    /// 2. strict verification passes (`Authentication`)
    /// 3. the claims name an access session and a subject (`Validation`)
    /// 4. the session resolves in the registry (`Session`)
    pub async fn authorize(&self, access_token: Option<&str>) -> AppResult<AuthenticatedSubject> {
        let token = access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Missing access token"))?;

        let verified = self.decoder.verify(token, false).map_err(|rejection| {
            debug!(reason = %rejection, "Access token rejected");
            AppError::from(rejection)
        })?;

        let claims = verified.claims;
        let session_id = claims
            .access_session()
            .ok_or_else(|| AppError::validation("Unable to retrieve user"))?;

        let user_id = self.registry.resolve(session_id).await?;
        if user_id != claims.user_id {
            return Err(AppError::session("session does not belong to token subject"));
        }

        Ok(AuthenticatedSubject {
            user_id,
            session_id: session_id.to_string(),
        })
    }
}
