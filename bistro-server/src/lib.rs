//! Bistro Server - online restaurant ordering backend
//!
//! # Architecture
//!
//! - **API** (`api`): JSON endpoints under `/api` plus `/healthz`
//! - **Auth** (`auth`): Argon2 passwords, HS256 JWT, request extractors
//! - **Database** (`db`): SQLite pool, migrations and repositories
//! - **Orders** (`orders`): order ledger, item normalization, money math
//!
//! # Module layout
//!
//! ```text
//! bistro-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # JWT, passwords, extractors
//! ├── api/           # routers and handlers
//! ├── routes/        # router assembly and middleware stack
//! ├── middleware/    # request logging
//! ├── orders/        # order ledger
//! ├── db/            # pool + repositories
//! └── utils/         # errors, extractors, logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod orders;
pub mod routes;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use routes::build_app;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
