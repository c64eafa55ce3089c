//! Unified error handling
//!
//! Re-exports the shared error system and converts repository failures.
//!
//! | RepoError | ErrorCode | HTTP |
//! |-----------|-----------|------|
//! | NotFound | NotFound | 404 |
//! | Duplicate | AlreadyExists | 400 |
//! | Database | DatabaseError | 500 |
//! | Unavailable | DatabaseUnavailable | 503 |

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Unavailable(msg) => AppError::unavailable(msg),
        }
    }
}
