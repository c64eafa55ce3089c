//! HTTP API modules
//!
//! Each module exposes `router()`; `routes::build_router` merges them.

pub mod auth;
pub mod contact;
pub mod health;
pub mod menu;
pub mod orders;
pub mod subscribe;
