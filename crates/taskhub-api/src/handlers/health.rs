//! Health check handlers.

use axum::Json;
use axum::extract::State;

use taskhub_core::traits::KeyValueStore;
use taskhub_database::UserStore;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let timeout = state.registry.timeout();
    let session_store = probe(tokio::time::timeout(timeout, state.store.health_check()).await);
    let user_store = probe(tokio::time::timeout(timeout, state.users.health_check()).await);

    let status = if session_store == "connected" && user_store == "connected" {
        "ok"
    } else {
        "degraded"
    };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        session_store: session_store.to_string(),
        user_store: user_store.to_string(),
    })
}

fn probe<E1, E2>(outcome: Result<Result<bool, E1>, E2>) -> &'static str {
    match outcome {
        Ok(Ok(true)) => "connected",
        _ => "unavailable",
    }
}
