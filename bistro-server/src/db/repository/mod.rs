//! Repository Module
//!
//! Free async functions over `&SqlitePool`, one module per table group.

// Accounts
pub mod user;

// Catalog
pub mod menu_item;

// Orders
pub mod order;

// Contact / newsletter
pub mod contact;
pub mod subscriber;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Store not reachable (pool closed, timed out, I/O failure)
    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepoError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Encode a string list for a JSON TEXT column
fn to_json_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a JSON TEXT column, empty on malformed data
fn from_json_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_list_helpers() {
        let encoded = to_json_list(&["basil".to_string(), "tomato".to_string()]);
        assert_eq!(encoded, r#"["basil","tomato"]"#);
        assert_eq!(from_json_list(&encoded), vec!["basil", "tomato"]);
        assert!(from_json_list("not json").is_empty());
    }

    #[tokio::test]
    async fn test_closed_pool_maps_to_unavailable() {
        let pool = test_support::pool().await;
        pool.close().await;
        let err: RepoError = sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, RepoError::Unavailable(_)));
    }
}
