//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use taskhub_auth::account::AccountService;
use taskhub_auth::gate::AuthorizationGate;
use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::session::{SessionManager, SessionRegistry};
use taskhub_core::config::AppConfig;
use taskhub_database::UserStore;
use taskhub_store::StoreManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Session store (Redis or in-memory)
    pub store: Arc<StoreManager>,
    /// Subject record store
    pub users: Arc<dyn UserStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Token issuer
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Token verifier
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Session id → subject registry
    pub registry: Arc<SessionRegistry>,
    /// Per-request authorization
    pub gate: Arc<AuthorizationGate>,
    /// Sign-in, rotation and sign-out
    pub session_manager: Arc<SessionManager>,
    /// Sign-up
    pub accounts: Arc<AccountService>,
}
