//! Order API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | none |
//! | /api/orders | GET | admin |
//! | /api/orders/{orderNumber} | PUT | admin |
//! | /api/orders/track/{orderNumber} | GET | none (email match) |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::place))
        .route("/track/{order_number}", get(handler::track))
        .route("/{order_number}", put(handler::update))
}
