//! Order API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::models::{OrderCreate, OrderEnvelope, OrderPage, OrderUpdate, TrackQuery};
use shared::request::PaginationQuery;

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::orders::ledger;
use crate::utils::{AppResult, Json, Path, Query};

/// POST /api/orders - place an order (public)
pub async fn place(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderEnvelope>)> {
    let order = ledger::place(state.pool(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderEnvelope {
            message: Some("Order placed successfully".to_string()),
            order,
        }),
    ))
}

/// GET /api/orders - paginated listing (admin)
pub async fn list(
    State(state): State<ServerState>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<OrderPage>> {
    let page = ledger::list(state.pool(), &query).await?;
    Ok(Json(page))
}

/// PUT /api/orders/{orderNumber} - status / step / ETA update (admin)
pub async fn update(
    State(state): State<ServerState>,
    AdminUser(admin): AdminUser,
    Path(order_number): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderEnvelope>> {
    tracing::debug!(order_number = %order_number, admin_id = admin.id, "Order update requested");
    let order = ledger::update(state.pool(), &order_number, payload).await?;
    Ok(Json(OrderEnvelope {
        message: Some("Order status updated".to_string()),
        order,
    }))
}

/// GET /api/orders/track/{orderNumber}?email= - customer tracking lookup
pub async fn track(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
    Query(query): Query<TrackQuery>,
) -> AppResult<Json<OrderEnvelope>> {
    let order = ledger::track(state.pool(), &order_number, query.email.as_deref()).await?;
    Ok(Json(OrderEnvelope {
        message: None,
        order,
    }))
}
