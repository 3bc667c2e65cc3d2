use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use taskhub_core::config::AuthConfig;
use taskhub_core::config::store::MemoryStoreConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::traits::KeyValueStore;
use taskhub_database::UserStore;
use taskhub_entity::user::User;
use taskhub_store::memory::MemoryStore;

/// Auth settings with cheap Argon2 parameters.
pub(crate) fn auth_config(secret: &str) -> AuthConfig {
    AuthConfig {
        jwt_secret: secret.to_string(),
        jwt_access_ttl_minutes: 15,
        jwt_refresh_ttl_hours: 168,
        store_timeout_seconds: 100,
        argon2_memory_kib: 8,
        argon2_iterations: 1,
        argon2_parallelism: 1,
    }
}

pub(crate) fn memory_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new(&MemoryStoreConfig::default()))
}

/// Memory store that fails every write after the first `allowed`.
#[derive(Debug)]
pub(crate) struct FailingWrites {
    inner: MemoryStore,
    allowed: AtomicUsize,
}

impl FailingWrites {
    pub(crate) fn after(allowed: usize) -> Self {
        Self {
            inner: MemoryStore::new(&MemoryStoreConfig::default()),
            allowed: AtomicUsize::new(allowed),
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingWrites {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.allowed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map_err(|_| AppError::store_unavailable("write refused"))?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<u64> {
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}

/// Store whose calls never complete.
#[derive(Debug)]
pub(crate) struct StalledStore;

#[async_trait]
impl KeyValueStore for StalledStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        std::future::pending().await
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        std::future::pending().await
    }

    async fn delete(&self, _key: &str) -> AppResult<u64> {
        std::future::pending().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        std::future::pending().await
    }
}

/// User store whose calls never complete.
#[derive(Debug)]
pub(crate) struct StalledUsers;

#[async_trait]
impl UserStore for StalledUsers {
    async fn create(&self, _user: &User) -> AppResult<User> {
        std::future::pending().await
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        std::future::pending().await
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<User>> {
        std::future::pending().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        std::future::pending().await
    }
}
