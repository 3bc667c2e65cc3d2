//! Application builder: wires configuration, stores and services into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use taskhub_auth::account::AccountService;
use taskhub_auth::gate::AuthorizationGate;
use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::password::PasswordHasher;
use taskhub_auth::session::{SessionManager, SessionRegistry};
use taskhub_core::config::AppConfig;
use taskhub_core::result::AppResult;
use taskhub_core::traits::{KeyValueStore, PasswordHashing};
use taskhub_database::UserStore;
use taskhub_store::StoreManager;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Connects the stores named in configuration and builds the state.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    info!(provider = %config.store.provider, "Initializing session store");
    let store = Arc::new(StoreManager::new(&config.store).await?);

    info!(provider = %config.database.provider, "Initializing user store");
    let users = taskhub_database::connect_user_store(&config.database).await?;

    build_state_with(config, store, users)
}

/// Builds the state over already-connected stores.
pub fn build_state_with(
    config: AppConfig,
    store: Arc<StoreManager>,
    users: Arc<dyn UserStore>,
) -> AppResult<AppState> {
    config.validate()?;

    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let hasher: Arc<dyn PasswordHashing> = Arc::new(PasswordHasher::new(&config.auth)?);

    let kv: Arc<dyn KeyValueStore> = store.clone();
    let registry = Arc::new(SessionRegistry::new(kv, &config.auth));
    let gate = Arc::new(AuthorizationGate::new(
        Arc::clone(&jwt_decoder),
        Arc::clone(&registry),
    ));
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&registry),
        Arc::clone(&users),
        Arc::clone(&hasher),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&users),
        hasher,
        registry.timeout(),
    ));

    Ok(AppState {
        config: Arc::new(config),
        store,
        users,
        jwt_encoder,
        jwt_decoder,
        registry,
        gate,
        session_manager,
        accounts,
    })
}
