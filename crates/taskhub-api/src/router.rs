//! Route definitions for the TaskHub HTTP API.
//!
//! All routes are mounted under `/api`. Routes in [`protected_routes`] run
//! behind the session middleware.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(protected_routes(state.clone()))
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Credential endpoints
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(handlers::auth::sign_up))
        .route("/users/signin", post(handlers::auth::sign_in))
        .route("/users/signout", post(handlers::auth::sign_out))
        .route("/users/refreshtoken", post(handlers::auth::refresh))
}

/// Endpoints requiring a registered access session
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_session,
        ))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
