//! Identity handlers: sign-up, sign-in, sign-out, refresh.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use taskhub_core::config::cookie::{ACCESS_COOKIE, REFRESH_COOKIE};
use taskhub_core::error::AppError;

use crate::cookies;
use crate::dto::request::{SignInRequest, SignUpRequest};
use crate::dto::response::{MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/users/signup
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    let user = state.accounts.sign_up(req).await?;
    Ok(Json(SessionResponse::ok(user.id.to_string())))
}

/// POST /api/users/signin
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid sign-in request: {e}")))?;

    let outcome = state
        .session_manager
        .sign_in(&req.email, &req.password)
        .await?;

    let jar = cookies::with_tokens(jar, &state.config, &outcome.tokens);
    Ok((jar, Json(SessionResponse::ok(outcome.user.id.to_string()))))
}

/// POST /api/users/signout
///
/// The credential cookies are cleared on every response, including errors.
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Result<Json<MessageResponse>, ApiError>) {
    let access = cookies::read(&jar, ACCESS_COOKIE);
    let refresh = cookies::read(&jar, REFRESH_COOKIE);

    let result = state
        .session_manager
        .sign_out(access.as_deref(), refresh.as_deref())
        .await
        .map(|()| {
            Json(MessageResponse {
                success: true,
                message: "Successfully signed out".to_string(),
            })
        })
        .map_err(ApiError::from);

    (cookies::cleared(jar, &state.config.cookie), result)
}

/// POST /api/users/refreshtoken
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>), ApiError> {
    let token = cookies::read(&jar, REFRESH_COOKIE);
    let tokens = state.session_manager.rotate(token.as_deref()).await?;

    let jar = cookies::with_tokens(jar, &state.config, &tokens);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse::ok(tokens.subject_id)),
    ))
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError(AppError::validation(rejection.body_text()))
}
