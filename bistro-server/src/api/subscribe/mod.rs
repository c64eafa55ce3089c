//! Newsletter routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/subscribe | POST | optional |
//! | /api/subscribe/check | GET | none |

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use http::StatusCode;
use shared::models::{SubscribeRequest, SubscribeResponse, SubscriptionQuery, SubscriptionStatus};
use shared::util::normalize_email;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::subscriber;
use crate::utils::validation::{is_valid_email, non_blank};
use crate::utils::{AppError, AppResult, ErrorCode, Json, Query};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/subscribe", post(subscribe))
        .route("/api/subscribe/check", get(check))
}

/// POST /api/subscribe - idempotent signup, records the user when logged in
pub async fn subscribe(
    State(state): State<ServerState>,
    user: Option<CurrentUser>,
    Json(payload): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<SubscribeResponse>)> {
    let email = non_blank(payload.email.as_deref())
        .filter(|e| is_valid_email(e))
        .ok_or_else(|| AppError::with_message(ErrorCode::InvalidEmail, "Valid email required"))?;
    let email = normalize_email(&email);

    let user_id = user.map(|u| u.id);
    let (subscriber, created) = subscriber::subscribe(state.pool(), &email, user_id).await?;

    if created {
        tracing::info!(subscriber_id = subscriber.id, user_id = ?user_id, "Newsletter subscription created");
        Ok((
            StatusCode::CREATED,
            Json(SubscribeResponse {
                message: "Subscribed".to_string(),
                subscriber,
                already_subscribed: false,
            }),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(SubscribeResponse {
                message: "Already subscribed".to_string(),
                subscriber,
                already_subscribed: true,
            }),
        ))
    }
}

/// GET /api/subscribe/check?email= - whether the address is subscribed
pub async fn check(
    State(state): State<ServerState>,
    Query(query): Query<SubscriptionQuery>,
) -> AppResult<Json<SubscriptionStatus>> {
    let email = non_blank(query.email.as_deref())
        .ok_or_else(|| AppError::validation("Email query parameter required"))?;
    if !is_valid_email(&email) {
        return Err(AppError::with_message(ErrorCode::InvalidEmail, "Valid email required"));
    }
    let email = normalize_email(&email);

    let subscribed = subscriber::find_by_email(state.pool(), &email)
        .await?
        .is_some();
    Ok(Json(SubscriptionStatus { subscribed, email }))
}
