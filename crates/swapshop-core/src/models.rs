use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Opaque item key. The only thing used for equality and membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Whose market we are browsing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an item can be picked up.
///
/// Listings carry a free-text place, user items carry coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Point { x: f64, y: f64 },
    Text(String),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Text(place) => f.write_str(place),
            Location::Point { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

/// A listed item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub location: Option<Location>,
    /// What the item is
    pub trade_tags: Vec<String>,
    /// What the owner wants in exchange
    pub looking_for: Vec<String>,
    pub posted: Option<NaiveDate>,
    pub image: Option<String>,
    pub owner: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            location: None,
            trade_tags: Vec::new(),
            looking_for: Vec::new(),
            posted: None,
            image: None,
            owner: None,
        }
    }

    pub fn with_trade_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trade_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_looking_for<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.looking_for = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_posted(mut self, posted: NaiveDate) -> Self {
        self.posted = Some(posted);
        self
    }

    /// Posted date in long form, e.g. "October 21, 2024"
    pub fn posted_display(&self) -> String {
        match self.posted {
            Some(date) => format_long_date(date),
            None => "Date unknown".to_string(),
        }
    }

    pub fn location_display(&self) -> String {
        self.location
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Parse the date formats the backend has been seen to send
pub fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    ["%Y-%m-%d", "%m-%d-%Y", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Text("Calvin".into()).to_string(), "Calvin");
        assert_eq!(Location::Point { x: 42.5, y: -85.0 }.to_string(), "(42.5, -85)");
    }

    #[test]
    fn test_posted_display_long_form() {
        let item = Item::new("1", "Lamp").with_posted(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(item.posted_display(), "October 1, 2024");
        assert_eq!(Item::new("2", "Chair").posted_display(), "Date unknown");
    }

    #[test]
    fn test_parse_posted_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 10, 21);
        assert_eq!(parse_posted_date("2024-10-21T14:03:00.000Z"), expected);
        assert_eq!(parse_posted_date("2024-10-21"), expected);
        assert_eq!(parse_posted_date("10-21-2024"), expected);
        assert_eq!(parse_posted_date("yesterday"), None);
    }

    #[test]
    fn test_item_ids_compare_by_value() {
        assert_eq!(ItemId::from(5u64), ItemId::from("5"));
        assert_ne!(ItemId::from("5"), ItemId::from("05"));
    }
}
