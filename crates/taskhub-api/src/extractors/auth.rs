//! `AuthUser` extractor: the subject established by the session middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use taskhub_auth::gate::AuthenticatedSubject;
use taskhub_core::error::AppError;

use crate::error::ApiError;

/// Authenticated subject available in handlers behind `require_session`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedSubject);

impl std::ops::Deref for AuthUser {
    type Target = AuthenticatedSubject;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedSubject>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::authentication("Not signed in")))
    }
}
