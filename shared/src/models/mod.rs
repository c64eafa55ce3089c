//! Data models
//!
//! Shared between bistro-server and its clients (via API).
//! Client-facing JSON uses camelCase keys.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod contact;
pub mod menu_item;
pub mod order;
pub mod subscriber;
pub mod user;

// Re-exports
pub use contact::*;
pub use menu_item::*;
pub use order::*;
pub use subscriber::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body (`{"message": "..."}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
