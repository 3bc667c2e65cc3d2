//! Token verification.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use thiserror::Error;

use taskhub_core::config::AuthConfig;
use taskhub_core::error::AppError;

use super::claims::Claims;

/// HMAC algorithms a token may be signed with.
const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Why a token was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// The `exp` claim is in the past.
    #[error("token has expired")]
    Expired,
    /// The header names an algorithm outside the HMAC family.
    #[error("unexpected signing method: {0}")]
    InvalidSigningMethod(String),
    /// The token or its claims could not be parsed.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The signature does not match the server secret.
    #[error("token signature is invalid")]
    InvalidSignature,
}

impl From<TokenRejection> for AppError {
    fn from(rejection: TokenRejection) -> Self {
        AppError::authentication(rejection.to_string())
    }
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Signed correctly and unexpired.
    Valid,
    /// Signed correctly but past `exp`; only returned when expiry is tolerated.
    Expired,
}

/// Claims of a token that passed verification.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    /// Decoded claims.
    pub claims: Claims,
    /// Whether the token is still within its lifetime.
    pub status: Validity,
}

impl VerifiedToken {
    /// Whether the token is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.status == Validity::Expired
    }
}

/// Validates signed tokens against the server secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature and structure checks; expiry is checked separately.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` and returns its claims.
    ///
    /// With `tolerate_expiry` an otherwise valid but expired token is
    /// returned with [`Validity::Expired`] instead of being rejected.
    /// Structural and signature failures are rejected either way.
    pub fn verify(
        &self,
        token: &str,
        tolerate_expiry: bool,
    ) -> Result<VerifiedToken, TokenRejection> {
        let header =
            decode_header(token).map_err(|e| TokenRejection::Malformed(e.to_string()))?;
        if !HMAC_FAMILY.contains(&header.alg) {
            return Err(TokenRejection::InvalidSigningMethod(format!("{:?}", header.alg)));
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::InvalidSignature => TokenRejection::InvalidSignature,
                JwtErrorKind::InvalidAlgorithm => {
                    TokenRejection::InvalidSigningMethod(format!("{:?}", header.alg))
                }
                _ => TokenRejection::Malformed(e.to_string()),
            }
        })?;

        // No skew allowance: a past `exp` is expired.
        let expired = data.claims.exp < Utc::now().timestamp();
        match (expired, tolerate_expiry) {
            (false, _) => Ok(VerifiedToken {
                claims: data.claims,
                status: Validity::Valid,
            }),
            (true, true) => Ok(VerifiedToken {
                claims: data.claims,
                status: Validity::Expired,
            }),
            (true, false) => Err(TokenRejection::Expired),
        }
    }
}
