use thiserror::Error;

/// Everything that can go wrong outside the pure filter/interest logic
#[derive(Error, Debug)]
pub enum Error {
    #[error("Marketplace request failed: {0}")]
    ApiError(#[from] swapshop_api::MarketApiError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
