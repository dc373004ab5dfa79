use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::models::{parse_item_list, ApiItem};
use crate::retry::{is_retryable_status, with_retry_if, RetryConfig};

pub const DEFAULT_BASE_URL: &str =
    "https://bombasticweb-dmenc3dmg9hhcxgk.canadaeast-01.azurewebsites.net";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Error, Debug)]
pub enum MarketApiError {
    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl MarketApiError {
    /// Transport hiccups and overloaded servers are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketApiError::Status { status, .. } => is_retryable_status(*status),
            MarketApiError::NetworkError(e) => !e.is_builder() && !e.is_decode(),
            MarketApiError::NotFound(_) | MarketApiError::ParseError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MarketApiError>;

/// Read-only client for the two startup endpoints
pub struct MarketClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl MarketClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!(
                "swapshop/",
                env!("CARGO_PKG_VERSION")
            )),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_config: RetryConfig::default(),
        })
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Listings visible to `user_id` (everyone else's items)
    pub async fn market_items(&self, user_id: &str) -> Result<Vec<ApiItem>> {
        self.get_items(&self.endpoint_url("market", user_id)).await
    }

    /// Items posted by `user_id`
    pub async fn user_items(&self, user_id: &str) -> Result<Vec<ApiItem>> {
        self.get_items(&self.endpoint_url("items", user_id)).await
    }

    fn endpoint_url(&self, resource: &str, user_id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            resource,
            urlencoding::encode(user_id)
        )
    }

    async fn get_items(&self, url: &str) -> Result<Vec<ApiItem>> {
        let client = &self.client;

        with_retry_if(
            &self.retry_config,
            move || async move {
                debug!("GET {}", url);
                let response = client.get(url).send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(MarketApiError::NotFound(url.to_string()));
                }

                if !status.is_success() {
                    return Err(MarketApiError::Status {
                        endpoint: url.to_string(),
                        status,
                    });
                }

                let body = response.text().await?;
                let items = parse_item_list(&body)?;
                debug!("{} returned {} items", url, items.len());
                Ok(items)
            },
            MarketApiError::is_retryable,
        )
        .await
    }
}
