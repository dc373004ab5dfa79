use crate::{
    models::{Item, UserId},
    Result,
};

/// Where market data comes from.
///
/// The HTTP backend implements this; tests swap in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MarketSource: Send + Sync {
    /// Listings from everyone except `user`
    async fn market_items(&self, user: &UserId) -> Result<Vec<Item>>;
    /// Items `user` has posted
    async fn user_items(&self, user: &UserId) -> Result<Vec<Item>>;
}
