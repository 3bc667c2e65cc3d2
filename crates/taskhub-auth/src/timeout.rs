use std::future::Future;
use std::time::Duration;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;

/// Run a store call, abandoning it once `limit` elapses.
pub(crate) async fn bounded<T>(
    limit: Duration,
    operation: &'static str,
    call: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::store_unavailable(format!(
            "{operation} timed out after {}s",
            limit.as_secs_f64()
        ))),
    }
}
