//! Newsletter Subscriber Model

use serde::{Deserialize, Serialize};

/// Newsletter subscription, one per normalized email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: i64,
    /// Trimmed, lowercased address
    pub email: String,
    /// Owning user when subscribed while logged in
    #[cfg_attr(feature = "db", sqlx(rename = "user_id"))]
    pub user: Option<i64>,
    pub created_at: i64,
}

/// Subscribe payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// Subscribe response, `already_subscribed` set when the email was known
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub message: String,
    pub subscriber: Subscriber,
    pub already_subscribed: bool,
}

/// Query for `GET /subscribe/check`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub email: Option<String>,
}

/// `GET /subscribe/check` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub subscribed: bool,
    pub email: String,
}
