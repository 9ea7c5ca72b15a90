//! Crate-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    /// The dataset document is missing, unreadable, or does not parse.
    #[error("data source error: {0}")]
    DataSource(String),

    /// A province argument did not resolve. Carries the name as given.
    #[error("province '{0}' not found")]
    ProvinceNotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
