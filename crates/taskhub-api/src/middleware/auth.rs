//! Session middleware guarding protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use taskhub_core::config::cookie::ACCESS_COOKIE;

use crate::cookies;
use crate::error::ApiError;
use crate::state::AppState;

/// Runs the authorization gate on the `access_token` cookie.
///
/// On success the [`AuthenticatedSubject`](taskhub_auth::gate::AuthenticatedSubject)
/// is stored in the request extensions for the `AuthUser` extractor and
/// in the response extensions for request logging. On failure the request
/// ends here.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookies::read(&jar, ACCESS_COOKIE);
    let subject = state.gate.authorize(token.as_deref()).await?;

    tracing::debug!(user_id = %subject.user_id, session_id = %subject.session_id, "Request authorized");
    request.extensions_mut().insert(subject.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(subject);
    Ok(response)
}
