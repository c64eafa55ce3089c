//! Utilities - shared helpers for handlers
//!
//! # Contents
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`Json`], [`Query`], [`Path`] - extractors with JSON rejections
//! - logging setup and input validation

pub mod error;
pub mod extract;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use extract::{Json, Path, Query};
