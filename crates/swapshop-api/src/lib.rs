// HTTP client for the marketplace backend
pub mod client;
pub mod models;
pub mod retry;

pub use client::{MarketApiError, MarketClient, Result, DEFAULT_BASE_URL};
pub use models::{parse_item_list, ApiItem, ApiLocation, RawId};
pub use reqwest::StatusCode;
pub use retry::RetryConfig;
