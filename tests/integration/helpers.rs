//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use taskhub_api::AppState;
use taskhub_core::config::AppConfig;
use taskhub_core::config::store::MemoryStoreConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::traits::KeyValueStore;
use taskhub_database::MemoryUserRepository;
use taskhub_store::StoreManager;
use taskhub_store::memory::MemoryStore;

const TEST_CONFIG: &str = r#"
[auth]
jwt_secret = "integration-test-secret"
argon2_memory_kib = 8
argon2_iterations = 1
argon2_parallelism = 1

[logging]
level = "warn"
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching the encoder and registry directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores
    pub async fn new() -> Self {
        let config = AppConfig::from_toml_str(TEST_CONFIG).expect("Failed to parse test config");
        let state = taskhub_api::build_state(config)
            .await
            .expect("Failed to build state");
        let router = taskhub_api::build_app(state.clone());
        Self { router, state }
    }

    /// Create a test application over the given session store
    pub fn with_session_store(store: Arc<dyn KeyValueStore>) -> Self {
        let config = AppConfig::from_toml_str(TEST_CONFIG).expect("Failed to parse test config");
        let state = taskhub_api::build_state_with(
            config,
            Arc::new(StoreManager::from_provider(store)),
            Arc::new(MemoryUserRepository::new()),
        )
        .expect("Failed to build state");
        let router = taskhub_api::build_app(state.clone());
        Self { router, state }
    }

    /// Sign up a user and return their id
    pub async fn sign_up(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/users/signup",
                Some(serde_json::json!({
                    "first_name": "Alice",
                    "last_name": "Liddell",
                    "email": email,
                    "password": password,
                })),
                &[],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Sign-up failed: {:?}", response.body);
        response.body["user_id"]
            .as_str()
            .expect("No user_id in sign-up response")
            .to_string()
    }

    /// Sign in and return the response carrying the credential cookies
    pub async fn sign_in(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/users/signin",
            Some(serde_json::json!({ "email": email, "password": password })),
            &[],
        )
        .await
    }

    /// Make an HTTP request to the test app, sending `cookies` as a Cookie header
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookies: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if !cookies.is_empty() {
            let cookie_header = cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            req = req.header(header::COOKIE, cookie_header);
        }

        let body = match body {
            Some(json) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_string(&json).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(req.body(body).expect("Failed to build request"))
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// Raw `Set-Cookie` line for `name`
    pub fn set_cookie(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}=");
        self.set_cookies
            .iter()
            .find(|c| c.starts_with(&prefix))
            .map(String::as_str)
    }

    /// Value assigned to cookie `name`
    pub fn cookie(&self, name: &str) -> Option<String> {
        let line = self.set_cookie(name)?;
        let pair = line.split(';').next()?;
        pair.split_once('=').map(|(_, value)| value.to_string())
    }
}

/// In-memory session store that refuses every write after the first `allowed`
#[derive(Debug)]
pub struct RefusingWrites {
    inner: MemoryStore,
    allowed: AtomicUsize,
}

impl RefusingWrites {
    /// Accept `allowed` writes, then fail the rest
    pub fn after(allowed: usize) -> Self {
        Self {
            inner: MemoryStore::new(&MemoryStoreConfig::default()),
            allowed: AtomicUsize::new(allowed),
        }
    }
}

#[async_trait]
impl KeyValueStore for RefusingWrites {
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
        Ok(true)
    }
}
