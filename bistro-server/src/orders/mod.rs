//! Order lifecycle
//!
//! - **items**: coercion and filtering of client-supplied line items
//! - **money**: decimal totals and reconciliation
//! - **ledger**: place / update / track / list on top of the order repository
//!
//! # Status progression
//!
//! ```text
//! Received → Preparing → Ready → Out for Delivery → Delivered
//! ```
//!
//! Transitions are admin-driven and not enforced to move forward.

pub mod items;
pub mod ledger;
pub mod money;

pub use ledger::{DEFAULT_ESTIMATED_TIME, format_order_number};
