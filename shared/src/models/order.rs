//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order progression stage
///
/// Strictly linear: `Received → Preparing → Ready → Out for Delivery → Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum OrderStatus {
    #[default]
    Received,
    Preparing,
    Ready,
    #[serde(rename = "Out for Delivery")]
    #[cfg_attr(feature = "db", sqlx(rename = "Out for Delivery"))]
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// All stages in progression order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Received,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Parse the exact wire value (case-sensitive)
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// 1-based position in the progression
    pub fn step(&self) -> u8 {
        match self {
            OrderStatus::Received => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Ready => 3,
            OrderStatus::OutForDelivery => 4,
            OrderStatus::Delivered => 5,
        }
    }

    /// Stage at a 1-based position
    pub fn from_step(step: u8) -> Option<Self> {
        Self::ALL.get(usize::from(step).checked_sub(1)?).copied()
    }

    /// Following stage, `None` once delivered
    pub fn next(&self) -> Option<Self> {
        Self::from_step(self.step() + 1)
    }

    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item (immutable after creation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    /// Unit price
    pub price: f64,
    pub quantity: u32,
}

/// Placed order as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Mirrors `order_number` for storefront compatibility
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub current_step: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    pub created_at: i64,
}

/// Place order payload
///
/// `items` stays raw JSON: entries are coerced and filtered server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Option<serde_json::Value>,
}

/// Admin update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub status: Option<String>,
    pub current_step: Option<i64>,
    pub estimated_time: Option<String>,
}

/// Query for `GET /orders/track/{orderNumber}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackQuery {
    pub email: Option<String>,
}

/// `POST /orders` and `PUT /orders/{orderNumber}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub order: Order,
}

/// Paginated order listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: u32,
    pub pages: u32,
}
