//! Server state shared by every handler

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtConfig, JwtService};
use crate::core::{Config, Result};
use crate::db::DbService;

/// Server state - cheap to clone, held by the router
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Loaded configuration |
/// | db | SQLite pool wrapper |
/// | jwt_service | Token issuing / verification |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(JwtConfig::new(
            config.jwt_secret.clone(),
        )));
        Self {
            config: Arc::new(config),
            db,
            jwt_service,
        }
    }

    /// Connect the database (bounded by the configured timeout) and build state
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::connect(config).await?;
        Ok(Self::new(config.clone(), db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
