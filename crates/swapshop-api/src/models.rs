use serde::{Deserialize, Serialize};
use tracing::warn;

/// Item as the backend sends it.
///
/// The backend and the older listing fixtures disagree on field names, so
/// each field accepts both spellings. Everything is optional here; the core
/// crate decides what a usable item is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiItem {
    #[serde(rename = "itemid", alias = "id", default)]
    pub id: Option<RawId>,

    #[serde(rename = "itemname", alias = "name", default)]
    pub name: Option<String>,

    #[serde(rename = "itemdescription", alias = "desc", alias = "description", default)]
    pub description: Option<String>,

    #[serde(rename = "itemlocation", alias = "location", default)]
    pub location: Option<ApiLocation>,

    #[serde(rename = "itemtags", alias = "tags", default)]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "lookingfortags", alias = "lookingFor", default)]
    pub looking_for: Option<Vec<String>>,

    #[serde(rename = "dateposted", alias = "postedDate", default)]
    pub date_posted: Option<String>,

    #[serde(rename = "itemimage", alias = "img", default)]
    pub image: Option<String>,

    #[serde(alias = "username", default)]
    pub owner: Option<String>,
}

/// Identifier as it appears on the wire: number or string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Location is a coordinate pair on user items and free text on listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiLocation {
    Point { x: f64, y: f64 },
    Text(String),
}

/// Parse a response body holding a JSON array of items.
///
/// The body must be an array. Elements that don't fit `ApiItem` are logged
/// and dropped so one bad record can't sink the rest of the batch.
pub fn parse_item_list(body: &str) -> serde_json::Result<Vec<ApiItem>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body)?;

    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<ApiItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping malformed item at index {}: {}", index, e);
                None
            }
        })
        .collect())
}
