//! One-way password hashing capability.

use crate::result::AppResult;

/// Pluggable password hashing algorithm.
///
/// Implementations are CPU-bound and synchronous.
pub trait PasswordHashing: Send + Sync + std::fmt::Debug + 'static {
    /// Hash a plaintext password with a fresh salt.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` for a mismatch; errors are reserved for
    /// unreadable hashes.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
