//! Handlers for the signed-in user.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use taskhub_core::error::AppError;

use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let id = Uuid::parse_str(&auth.user_id)
        .map_err(|_| AppError::not_found("User not found"))?;

    let user = state
        .accounts
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}
