//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use taskhub_auth::gate::AuthenticatedSubject;

/// Logs method, path, status, latency and the authorized subject, if any.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        user_id = subject_of(&response).unwrap_or("-"),
        "HTTP request"
    );

    response
}

/// Subject `require_session` attached to the response.
fn subject_of(response: &Response) -> Option<&str> {
    response
        .extensions()
        .get::<AuthenticatedSubject>()
        .map(|subject| subject.user_id.as_str())
}
