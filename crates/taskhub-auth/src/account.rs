//! Sign-up.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::traits::PasswordHashing;
use taskhub_database::UserStore;
use taskhub_entity::user::{CreateUser, User};

use crate::timeout::bounded;

/// Sign-up request body.
#[derive(Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Given name.
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
    /// Login email.
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Creates subjects.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHashing>,
    timeout: Duration,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHashing>,
        timeout: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            timeout,
        }
    }

    /// Validates the request, hashes the password and inserts the subject.
    ///
    /// A taken email surfaces as the store's `Database` error.
    pub async fn sign_up(&self, mut request: SignUpRequest) -> AppResult<User> {
        request.first_name = request.first_name.trim().to_string();
        request.last_name = request.last_name.trim().to_string();
        request.email = normalize_email(&request.email);
        request
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid sign-up request: {e}")))?;

        let password_hash = self.hasher.hash_password(&request.password)?;
        let user = User::from_create(CreateUser {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
        });

        let user = bounded(self.timeout, "user insert", self.users.create(&user)).await?;
        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Looks up a subject's profile by id.
    pub async fn find(&self, id: Uuid) -> AppResult<Option<User>> {
        bounded(self.timeout, "user lookup", self.users.find_by_id(id)).await
    }
}

/// Canonical form emails are stored and looked up in.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
