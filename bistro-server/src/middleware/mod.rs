//! HTTP middleware

pub mod logging;
pub mod timeout;

pub use logging::logging_middleware;
pub use timeout::timeout_middleware;
