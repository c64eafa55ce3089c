//! Request timeout middleware
//!
//! Bounds each request by the configured duration and answers an overrun
//! with the regular JSON error body.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::utils::{AppError, ErrorCode};

/// Per-request timeout
///
/// Install with `from_fn_with_state(duration, timeout_middleware)`. The
/// inner future is dropped on expiry.
pub async fn timeout_middleware(
    State(limit): State<Duration>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                method = %method,
                path = %path,
                timeout_ms = %limit.as_millis(),
                "Request timed out"
            );
            AppError::new(ErrorCode::TimeoutError).into_response()
        }
    }
}
