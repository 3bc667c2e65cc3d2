//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_entity::user::User;

/// Body of sign-up, sign-in and refresh responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Subject the credentials belong to.
    pub user_id: String,
}

impl SessionResponse {
    /// Successful response for `user_id`.
    pub fn ok(user_id: impl Into<String>) -> Self {
        Self {
            success: true,
            user_id: user_id.into(),
        }
    }
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Message.
    pub message: String,
}

/// Public profile of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Backend reachability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `ok` when every backend answered, `degraded` otherwise.
    pub status: String,
    /// Session store status.
    pub session_store: String,
    /// User store status.
    pub user_store: String,
}
