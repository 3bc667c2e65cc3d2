//! # taskhub-auth
//!
//! The credential lifecycle for TaskHub.
//!
//! ## Modules
//!
//! - `jwt`: signed access/refresh token pairs and their verification
//! - `password`: Argon2id implementation of the hashing collaborator
//! - `session`: session registry plus the sign-in, rotation and sign-out flows
//! - `gate`: per-request authorization against the registry
//! - `account`: sign-up

pub mod account;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;

mod timeout;

pub use account::{AccountService, SignUpRequest};
pub use gate::{AuthenticatedSubject, AuthorizationGate};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenRejection, Validity, VerifiedToken};
pub use password::PasswordHasher;
pub use session::{SessionManager, SessionRegistry, SignInOutcome};

#[cfg(test)]
pub(crate) mod test_support;
