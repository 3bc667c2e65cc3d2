//! Key-value store trait backing the session registry.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for session store backends (Redis or in-memory).
///
/// Implementations must make `set` and `delete` atomic per key. No
/// multi-key transaction is offered. Keys are passed unprefixed; the
/// backend applies its own namespace.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value that the store deletes once `ttl` elapses.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Returns the number of live entries removed (0 or 1).
    async fn delete(&self, key: &str) -> AppResult<u64>;

    /// Check whether a live key exists.
    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
