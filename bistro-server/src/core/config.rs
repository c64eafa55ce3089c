use super::ServerError;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | (required) | SQLite connection string, e.g. `sqlite://bistro.db` |
/// | JWT_SECRET | (required) | HS256 signing secret |
/// | HTTP_PORT | 5000 | HTTP listen port |
/// | LOG_LEVEL | info | Default tracing level |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
/// | DB_MAX_CONNECTIONS | 5 | Pool size |
/// | DB_CONNECT_TIMEOUT_SECS | 8 | Startup connection timeout |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite://bistro.db JWT_SECRET=change-me HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub http_port: u16,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub db_max_connections: u32,
    pub db_connect_timeout_secs: u64,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Configuration with defaults for everything but the two required values
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            http_port: 5000,
            log_level: "info".into(),
            log_dir: None,
            db_max_connections: 5,
            db_connect_timeout_secs: 8,
            request_timeout_ms: 30_000,
        }
    }

    /// Load configuration from environment variables
    ///
    /// `DATABASE_URL` and `JWT_SECRET` must be set and non-empty.
    pub fn from_env() -> Result<Self, ServerError> {
        let database_url = require("DATABASE_URL")?;
        let jwt_secret = require("JWT_SECRET")?;

        Ok(Self {
            database_url,
            jwt_secret,
            http_port: parse_env("HTTP_PORT", 5000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 5),
            db_connect_timeout_secs: parse_env("DB_CONNECT_TIMEOUT_SECS", 8),
            request_timeout_ms: parse_env("REQUEST_TIMEOUT_MS", 30_000),
        })
    }
}

fn require(name: &str) -> Result<String, ServerError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServerError::Config(format!("{name} must be set"))),
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
