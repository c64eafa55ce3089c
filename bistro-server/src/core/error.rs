use thiserror::Error;

/// Startup and server lifecycle errors
///
/// Request-level failures use [`shared::AppError`]; this type covers the
/// conditions that stop the process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
