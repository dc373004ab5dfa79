// HTTP market source - bridges the API client with MarketSource
use async_trait::async_trait;
use swapshop_api::{ApiItem, ApiLocation, MarketClient};
use tracing::warn;

use crate::{
    models::{parse_posted_date, Item, ItemId, Location, UserId},
    source::MarketSource,
    Error, Result,
};

/// Wrapper around MarketClient that implements MarketSource
pub struct HttpMarketSource {
    client: MarketClient,
}

impl HttpMarketSource {
    pub fn new(client: MarketClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MarketSource for HttpMarketSource {
    async fn market_items(&self, user: &UserId) -> Result<Vec<Item>> {
        let items = self.client.market_items(user.as_str()).await?;
        Ok(convert_all(items))
    }

    async fn user_items(&self, user: &UserId) -> Result<Vec<Item>> {
        let items = self.client.user_items(user.as_str()).await?;
        Ok(convert_all(items))
    }
}

/// Keep the items that pass validation, log the rest
fn convert_all(items: Vec<ApiItem>) -> Vec<Item> {
    items
        .into_iter()
        .filter_map(|raw| match api_to_item(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping item: {}", e);
                None
            }
        })
        .collect()
}

/// Convert a wire item to our Item model.
///
/// An item needs an id and a name. Missing tag lists become empty lists.
pub fn api_to_item(raw: ApiItem) -> Result<Item> {
    let id = raw
        .id
        .map(|id| ItemId::new(id.to_string()))
        .ok_or_else(|| {
            Error::InvalidItem(format!(
                "missing id (name: {})",
                raw.name.as_deref().unwrap_or("<none>")
            ))
        })?;

    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| Error::InvalidItem(format!("item {} has no name", id)))?;

    let posted = raw.date_posted.as_deref().and_then(|d| {
        let parsed = parse_posted_date(d);
        if parsed.is_none() {
            warn!("Unrecognized posted date {:?} on item {}", d, id);
        }
        parsed
    });

    Ok(Item {
        id,
        name,
        description: raw.description.unwrap_or_default(),
        location: raw.location.map(|loc| match loc {
            ApiLocation::Point { x, y } => Location::Point { x, y },
            ApiLocation::Text(place) => Location::Text(place),
        }),
        trade_tags: raw.tags.unwrap_or_default(),
        looking_for: raw.looking_for.unwrap_or_default(),
        posted,
        image: raw.image,
        owner: raw.owner,
    })
}
