//! Health check route
//!
//! | Path | Method | Description | Auth |
//! |------|--------|-------------|------|
//! | /healthz | GET | Liveness + database readiness | none |
//!
//! ```json
//! {"ok": true, "db": "connected", "version": "0.1.0"}
//! ```
//!
//! Responds 503 with `ok: false` when the database probe fails.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/healthz", get(healthz))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    ok: bool,
    /// connected | disconnected
    db: &'static str,
    version: &'static str,
}

/// GET /healthz
pub async fn healthz(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let connected = state.db.ping().await;
    let status = if connected {
        StatusCode::OK
    } else {
        tracing::warn!("Health check: database unreachable");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            ok: connected,
            db: if connected { "connected" } else { "disconnected" },
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
