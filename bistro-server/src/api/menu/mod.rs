//! Menu API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/menu | GET | none |
//! | /api/menu | POST | admin |
//! | /api/menu/{id} | PUT, DELETE | admin |
//! | /api/menu/{id}/reviews | GET | none |
//! | /api/menu/{id}/reviews | POST | user |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route(
            "/{id}/reviews",
            get(handler::list_reviews).post(handler::add_review),
        )
}
