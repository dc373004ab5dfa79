// Process-wide market data, loaded once at startup and on retry
use tracing::{error, info};

use crate::{
    models::{Item, UserId},
    source::MarketSource,
    Error,
};

/// Result of a load attempt. Failures are values, not panics or errors.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { market: usize, mine: usize },
    Failed { reason: Error },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    /// Human-readable failure reason, if any
    pub fn failure(&self) -> Option<String> {
        match self {
            LoadOutcome::Loaded { .. } => None,
            LoadOutcome::Failed { reason } => Some(reason.to_string()),
        }
    }
}

/// Fetched items for one user.
///
/// Starts empty. `load` replaces both lists together or not at all, so the
/// market and the user's items always come from the same fetch.
#[derive(Debug, Clone)]
pub struct MarketContext {
    user_id: UserId,
    market_items: Vec<Item>,
    user_items: Vec<Item>,
    loading: bool,
}

impl MarketContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            market_items: Vec::new(),
            user_items: Vec::new(),
            loading: false,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn market_items(&self) -> &[Item] {
        &self.market_items
    }

    pub fn user_items(&self) -> &[Item] {
        &self.user_items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch market and user items concurrently.
    ///
    /// Safe to call repeatedly; a failed attempt keeps whatever the last
    /// successful load produced.
    pub async fn load(&mut self, source: &dyn MarketSource) -> LoadOutcome {
        self.loading = true;
        info!("Loading market data for user {}", self.user_id);

        let fetched = futures::future::try_join(
            source.market_items(&self.user_id),
            source.user_items(&self.user_id),
        )
        .await;

        self.loading = false;

        match fetched {
            Ok((market, mine)) => {
                info!(
                    "Loaded {} market items and {} own items",
                    market.len(),
                    mine.len()
                );
                let outcome = LoadOutcome::Loaded {
                    market: market.len(),
                    mine: mine.len(),
                };
                self.market_items = market;
                self.user_items = mine;
                outcome
            }
            Err(reason) => {
                error!("Error fetching market data: {}", reason);
                LoadOutcome::Failed { reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockMarketSource;
    use swapshop_api::{MarketApiError, StatusCode};

    fn user() -> UserId {
        UserId::new("2")
    }

    fn status_error(endpoint: &str) -> Error {
        Error::ApiError(MarketApiError::Status {
            endpoint: endpoint.to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        })
    }

    #[tokio::test]
    async fn test_load_success_fills_both_lists() {
        let mut source = MockMarketSource::new();
        source
            .expect_market_items()
            .returning(|_| Ok(vec![Item::new("1", "Lamp"), Item::new("2", "Desk")]));
        source
            .expect_user_items()
            .returning(|_| Ok(vec![Item::new("9", "Bike")]));

        let mut ctx = MarketContext::new(user());
        let outcome = ctx.load(&source).await;

        assert!(matches!(outcome, LoadOutcome::Loaded { market: 2, mine: 1 }));
        assert_eq!(ctx.market_items().len(), 2);
        assert_eq!(ctx.user_items()[0].name, "Bike");
        assert!(!ctx.is_loading());
    }

    #[tokio::test]
    async fn test_both_fetches_failing_leaves_empty_state() {
        let mut source = MockMarketSource::new();
        source
            .expect_market_items()
            .returning(|_| Err(status_error("/market/2")));
        source
            .expect_user_items()
            .returning(|_| Err(status_error("/items/2")));

        let mut ctx = MarketContext::new(user());
        let outcome = ctx.load(&source).await;

        assert!(!outcome.is_loaded());
        assert!(outcome.failure().is_some());
        assert!(ctx.market_items().is_empty());
        assert!(ctx.user_items().is_empty());
        assert!(!ctx.is_loading());
    }

    #[tokio::test]
    async fn test_one_failure_keeps_no_partial_data() {
        let mut source = MockMarketSource::new();
        source
            .expect_market_items()
            .returning(|_| Ok(vec![Item::new("1", "Lamp")]));
        source
            .expect_user_items()
            .returning(|_| Err(status_error("/items/2")));

        let mut ctx = MarketContext::new(user());
        let outcome = ctx.load(&source).await;

        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert!(ctx.market_items().is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure_loads() {
        let mut failing = MockMarketSource::new();
        failing
            .expect_market_items()
            .returning(|_| Err(status_error("/market/2")));
        failing.expect_user_items().returning(|_| Ok(Vec::new()));

        let mut healthy = MockMarketSource::new();
        healthy
            .expect_market_items()
            .times(1)
            .returning(|_| Ok(vec![Item::new("1", "Lamp")]));
        healthy
            .expect_user_items()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut ctx = MarketContext::new(user());
        assert!(!ctx.load(&failing).await.is_loaded());
        assert!(ctx.load(&healthy).await.is_loaded());
        assert_eq!(ctx.market_items().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        let mut healthy = MockMarketSource::new();
        healthy
            .expect_market_items()
            .returning(|_| Ok(vec![Item::new("1", "Lamp")]));
        healthy
            .expect_user_items()
            .returning(|_| Ok(vec![Item::new("7", "Mug")]));

        let mut failing = MockMarketSource::new();
        failing
            .expect_market_items()
            .returning(|_| Err(status_error("/market/2")));
        failing
            .expect_user_items()
            .returning(|_| Err(status_error("/items/2")));

        let mut ctx = MarketContext::new(user());
        ctx.load(&healthy).await;
        ctx.load(&failing).await;

        assert_eq!(ctx.market_items().len(), 1);
        assert_eq!(ctx.user_items().len(), 1);
    }

    #[tokio::test]
    async fn test_requests_use_context_user() {
        let mut source = MockMarketSource::new();
        source
            .expect_market_items()
            .withf(|u| u.as_str() == "2")
            .returning(|_| Ok(Vec::new()));
        source
            .expect_user_items()
            .withf(|u| u.as_str() == "2")
            .returning(|_| Ok(Vec::new()));

        let mut ctx = MarketContext::new(user());
        assert!(ctx.load(&source).await.is_loaded());
    }
}
