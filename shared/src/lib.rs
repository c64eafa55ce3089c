//! Shared types for the Bistro backend
//!
//! Wire types used by the HTTP service and its clients: the unified error
//! system, domain models, paging helpers and small utilities.

pub mod error;
pub mod models;
pub mod request;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
