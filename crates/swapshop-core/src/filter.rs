use std::collections::BTreeSet;

use crate::models::Item;

/// Tags offered in the filter picker
pub const ALLOWED_TAGS: [&str; 8] = [
    "books",
    "decor",
    "kitchenware",
    "furniture",
    "appliances",
    "electronics",
    "toys",
    "games",
];

pub const DEFAULT_LOOKING_FOR: [&str; 3] = ["furniture", "appliances", "electronics"];
pub const DEFAULT_TRADING_AWAY: [&str; 2] = ["decor", "kitchenware"];

/// What the user wants to see in the market list.
///
/// An item passes when it overlaps both tag sets and, if a name query is
/// set, its name contains the query ignoring case. Tags themselves compare
/// case-sensitively. An empty tag set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Matched against the item's looking-for tags
    pub looking_for: BTreeSet<String>,
    /// Matched against the item's trade tags
    pub trading_away: BTreeSet<String>,
    pub name_query: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKING_FOR, DEFAULT_TRADING_AWAY)
    }
}

impl FilterCriteria {
    pub fn new<L, T, S>(looking_for: L, trading_away: T) -> Self
    where
        L: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            looking_for: looking_for.into_iter().map(Into::into).collect(),
            trading_away: trading_away.into_iter().map(Into::into).collect(),
            name_query: String::new(),
        }
    }

    pub fn with_name_query(mut self, query: impl Into<String>) -> Self {
        self.name_query = query.into();
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        let wants_match = item
            .looking_for
            .iter()
            .any(|tag| self.looking_for.contains(tag));
        let offers_match = item
            .trade_tags
            .iter()
            .any(|tag| self.trading_away.contains(tag));

        wants_match && offers_match && self.name_matches(&item.name)
    }

    fn name_matches(&self, name: &str) -> bool {
        self.name_query.is_empty()
            || name
                .to_lowercase()
                .contains(&self.name_query.to_lowercase())
    }

    /// Select or deselect a looking-for tag. Returns whether it is now selected.
    pub fn toggle_looking_for(&mut self, tag: &str) -> bool {
        toggle_tag(&mut self.looking_for, tag)
    }

    /// Select or deselect a trading-away tag. Returns whether it is now selected.
    pub fn toggle_trading_away(&mut self, tag: &str) -> bool {
        toggle_tag(&mut self.trading_away, tag)
    }

    /// Back to the default tag selection, keeping the name query
    pub fn reset_tags(&mut self) {
        let defaults = Self::default();
        self.looking_for = defaults.looking_for;
        self.trading_away = defaults.trading_away;
    }
}

fn toggle_tag(set: &mut BTreeSet<String>, tag: &str) -> bool {
    if set.remove(tag) {
        false
    } else {
        set.insert(tag.to_string());
        true
    }
}

/// Items that pass `criteria`, in input order
pub fn filter_items<'a>(items: &'a [Item], criteria: &FilterCriteria) -> Vec<&'a Item> {
    items.iter().filter(|item| criteria.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, looking_for: &[&str], tags: &[&str]) -> Item {
        Item::new(id, name)
            .with_looking_for(looking_for.iter().copied())
            .with_trade_tags(tags.iter().copied())
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.to_string()).collect()
    }

    #[test]
    fn test_single_overlap_on_both_sides() {
        let items = vec![
            item("1", "Bookshelf", &["furniture"], &["books"]),
            item("2", "Radio", &["electronics"], &["decor"]),
        ];
        let criteria = FilterCriteria::new(["furniture"], ["books"]);

        assert_eq!(ids(&filter_items(&items, &criteria)), vec!["1"]);
    }

    #[test]
    fn test_disjoint_tags_match_nothing() {
        let items = vec![
            item("1", "Puzzle", &["toys"], &["games"]),
            item("2", "Blender", &["books"], &["appliances"]),
        ];
        let criteria = FilterCriteria::new(["furniture", "decor"], ["kitchenware"]);

        assert!(filter_items(&items, &criteria).is_empty());
    }

    #[test]
    fn test_empty_looking_for_matches_nothing() {
        let items = vec![item("1", "Lamp", &["decor"], &["decor"])];
        let criteria = FilterCriteria::new(Vec::<String>::new(), vec!["decor".to_string()]);

        assert!(filter_items(&items, &criteria).is_empty());
    }

    #[test]
    fn test_empty_trading_away_matches_nothing() {
        let items = vec![item("1", "Lamp", &["decor"], &["decor"])];
        let criteria = FilterCriteria::new(vec!["decor".to_string()], Vec::<String>::new());

        assert!(filter_items(&items, &criteria).is_empty());
    }

    #[test]
    fn test_overlap_is_enough_no_subset_required() {
        let items = vec![item(
            "1",
            "Mixer",
            &["furniture", "toys", "games"],
            &["appliances", "kitchenware"],
        )];
        let criteria = FilterCriteria::new(["furniture"], ["kitchenware"]);

        assert_eq!(filter_items(&items, &criteria).len(), 1);
    }

    #[test]
    fn test_order_preserved_and_no_duplicates() {
        let items = vec![
            item("c", "Chair", &["decor"], &["furniture"]),
            item("a", "Armchair", &["decor"], &["furniture"]),
            item("x", "Xbox", &["books"], &["electronics"]),
            item("b", "Bench", &["decor"], &["furniture"]),
        ];
        let criteria = FilterCriteria::new(["decor"], ["furniture"]);

        assert_eq!(ids(&filter_items(&items, &criteria)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_name_query_is_case_insensitive_substring() {
        let items = vec![
            item("1", "Vintage Lamp", &["decor"], &["decor"]),
            item("2", "Desk", &["decor"], &["decor"]),
        ];
        let criteria = FilterCriteria::new(["decor"], ["decor"]).with_name_query("LAMP");

        assert_eq!(ids(&filter_items(&items, &criteria)), vec!["1"]);
    }

    #[test]
    fn test_empty_name_query_is_a_no_op() {
        let items = vec![
            item("1", "Vintage Lamp", &["decor"], &["decor"]),
            item("2", "", &["decor"], &["decor"]),
        ];
        let criteria = FilterCriteria::new(["decor"], ["decor"]).with_name_query("");

        assert_eq!(filter_items(&items, &criteria).len(), 2);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let items = vec![item("1", "Lamp", &["Decor"], &["decor"])];
        let criteria = FilterCriteria::new(["decor"], ["decor"]);

        assert!(filter_items(&items, &criteria).is_empty());
    }

    #[test]
    fn test_empty_item_list() {
        assert!(filter_items(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_default_criteria() {
        let criteria = FilterCriteria::default();
        assert!(criteria.looking_for.contains("furniture"));
        assert!(criteria.looking_for.contains("appliances"));
        assert!(criteria.looking_for.contains("electronics"));
        assert_eq!(criteria.trading_away.len(), 2);
        assert!(criteria.name_query.is_empty());
    }

    #[test]
    fn test_toggle_tags() {
        let mut criteria = FilterCriteria::default();

        assert!(!criteria.toggle_looking_for("furniture"));
        assert!(!criteria.looking_for.contains("furniture"));
        assert!(criteria.toggle_looking_for("furniture"));
        assert!(criteria.looking_for.contains("furniture"));

        assert!(criteria.toggle_trading_away("toys"));
        assert!(criteria.trading_away.contains("toys"));

        criteria.name_query = "lamp".into();
        criteria.reset_tags();
        assert_eq!(criteria.trading_away, FilterCriteria::default().trading_away);
        assert_eq!(criteria.name_query, "lamp");
    }

    #[test]
    fn test_allowed_tags_cover_defaults() {
        for tag in DEFAULT_LOOKING_FOR.iter().chain(DEFAULT_TRADING_AWAY.iter()) {
            assert!(ALLOWED_TAGS.contains(tag));
        }
    }
}
