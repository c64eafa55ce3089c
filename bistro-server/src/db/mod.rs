//! Database Module
//!
//! Handles the SQLite connection pool and migrations

pub mod repository;

use crate::core::{Config, ServerError};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for the readiness probe
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Database service, owns a SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open the configured database (WAL, foreign keys) and apply migrations
    ///
    /// Connection establishment is bounded by `db_connect_timeout_secs`.
    pub async fn connect(config: &Config) -> Result<Self, ServerError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| ServerError::Database(format!("Invalid DATABASE_URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(5000));

        let timeout = Duration::from_secs(config.db_connect_timeout_secs);
        let connecting = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections.max(1))
            .acquire_timeout(timeout)
            .connect_with(options);

        let pool = tokio::time::timeout(timeout, connecting)
            .await
            .map_err(|_| {
                ServerError::Database(format!(
                    "Timed out after {}s connecting to database",
                    config.db_connect_timeout_secs
                ))
            })?
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Private in-memory database with migrations applied
    ///
    /// A single connection that never expires keeps the database alive for
    /// the lifetime of the pool.
    pub async fn in_memory() -> Result<Self, ServerError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ServerError::Database(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), ServerError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Readiness probe: `SELECT 1` within two seconds
    pub async fn ping(&self) -> bool {
        let ping = sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&self.pool);
        matches!(tokio::time::timeout(PING_TIMEOUT, ping).await, Ok(Ok(1)))
    }
}
