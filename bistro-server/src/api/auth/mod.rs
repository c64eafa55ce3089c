//! Auth API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/register | POST | none |
//! | /api/login | POST | none |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
}
