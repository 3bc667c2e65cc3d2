//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

pub use taskhub_auth::account::SignUpRequest;

/// Sign-in request body.
#[derive(Clone, Deserialize, Validate)]
pub struct SignInRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
