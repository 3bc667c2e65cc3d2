//! Session registry: which session ids are currently usable, and by whom.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use taskhub_core::config::AuthConfig;
use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::traits::KeyValueStore;
use taskhub_store::keys;

use crate::jwt::TokenPair;
use crate::timeout::bounded;

/// Shortest TTL ever written; the store rejects zero.
const MIN_SESSION_TTL: Duration = Duration::from_secs(1);

/// Maps session ids to subjects in the session store.
///
/// Presence in the registry is what makes a token usable: a revoked or
/// expired session id never resolves again.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    store: Arc<dyn KeyValueStore>,
    timeout: Duration,
}

impl SessionRegistry {
    /// Creates a registry over `store`, bounding calls by the configured timeout.
    pub fn new(store: Arc<dyn KeyValueStore>, config: &AuthConfig) -> Self {
        Self::with_timeout(store, Duration::from_secs(config.store_timeout_seconds))
    }

    /// Creates a registry with an explicit per-call timeout.
    pub fn with_timeout(store: Arc<dyn KeyValueStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Upper bound on a single store call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Records both sessions of `pair` for `subject_id`.
    ///
    /// The access session is written first. The two writes are independent:
    /// if the second fails the first stays registered until its TTL elapses.
    pub async fn register(&self, subject_id: &str, pair: &TokenPair) -> AppResult<()> {
        let now = Utc::now();
        self.write(
            &pair.access_uuid,
            subject_id,
            remaining(pair.access_expires_at, now),
        )
        .await?;
        self.write(
            &pair.refresh_uuid,
            subject_id,
            remaining(pair.refresh_expires_at, now),
        )
        .await?;

        debug!(
            subject_id,
            access_session = %pair.access_uuid,
            refresh_session = %pair.refresh_uuid,
            "Registered session pair"
        );
        Ok(())
    }

    /// Returns the subject a live session belongs to.
    pub async fn resolve(&self, session_id: &str) -> AppResult<String> {
        let key = keys::session(session_id);
        let subject = self.call("session lookup", self.store.get(&key)).await?;
        subject.ok_or_else(|| AppError::session("session revoked or expired"))
    }

    /// Deletes a session, returning 1 if it was live and 0 otherwise.
    pub async fn revoke(&self, session_id: &str) -> AppResult<u64> {
        let key = keys::session(session_id);
        let removed = self.call("session revoke", self.store.delete(&key)).await?;
        debug!(session_id, removed, "Revoked session");
        Ok(removed)
    }

    async fn write(&self, session_id: &str, subject_id: &str, ttl: Duration) -> AppResult<()> {
        let key = keys::session(session_id);
        self.call("session write", self.store.set(&key, subject_id, ttl))
            .await
    }

    /// Bounds a store call and reports every failure as `StoreUnavailable`.
    async fn call<T>(
        &self,
        operation: &'static str,
        call: impl std::future::Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        bounded(self.timeout, operation, call)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::StoreUnavailable => e,
                _ => AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    format!("{operation} failed"),
                    e,
                ),
            })
    }
}

fn remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (expires_at - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
        .max(MIN_SESSION_TTL)
}
