use crate::models::{Item, ItemId};

/// The user's shortlist of items they want to pursue.
///
/// Membership is decided by `ItemId` only. Insertion order is kept so the
/// shortlist screen lists items in the order they were flagged, but two
/// sets with the same members compare equal regardless of order.
#[derive(Debug, Clone, Default)]
pub struct InterestSet {
    items: Vec<Item>,
}

impl InterestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// New set with `item`'s membership flipped
    pub fn toggled(&self, item: &Item) -> Self {
        let mut next = self.clone();
        next.toggle(item);
        next
    }

    /// Flip `item`'s membership in place. Returns true if it is now in the set.
    pub fn toggle(&mut self, item: &Item) -> bool {
        if let Some(pos) = self.position(&item.id) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(item.clone());
            true
        }
    }

    pub fn is_interested(&self, item: &Item) -> bool {
        self.contains(&item.id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }
}

impl PartialEq for InterestSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|i| other.contains(&i.id))
    }
}

impl Eq for InterestSet {}

/// Label for the detail screen's interest button
pub fn interest_button_label(interested: bool) -> &'static str {
    if interested {
        "Not Interested"
    } else {
        "Interested"
    }
}

/// Heart shown next to list entries
pub fn interest_badge(interested: bool) -> &'static str {
    if interested {
        "♥"
    } else {
        "♡"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(ids: &[&str]) -> InterestSet {
        let mut set = InterestSet::new();
        for id in ids {
            set.toggle(&Item::new(*id, format!("item {}", id)));
        }
        set
    }

    #[test]
    fn test_double_toggle_from_empty() {
        let item = Item::new("5", "Kettle");
        let once = InterestSet::new().toggled(&item);
        assert!(once.is_interested(&item));

        let twice = once.toggled(&item);
        assert!(!twice.is_interested(&item));
        assert!(twice.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_set() {
        let start = set_of(&["1", "2", "3"]);
        for id in ["2", "9"] {
            let x = Item::new(id, "probe");
            assert_eq!(start.toggled(&x).toggled(&x), start);
        }
    }

    #[test]
    fn test_toggle_flips_only_the_queried_item() {
        let start = set_of(&["1", "2"]);
        let x = Item::new("3", "Rug");
        let next = start.toggled(&x);

        assert_eq!(next.is_interested(&x), !start.is_interested(&x));
        assert!(next.contains(&ItemId::from("1")));
        assert!(next.contains(&ItemId::from("2")));
    }

    #[test]
    fn test_membership_uses_id_not_name() {
        let mut set = InterestSet::new();
        set.toggle(&Item::new("1", "Lamp"));

        assert!(set.is_interested(&Item::new("1", "Renamed lamp")));
        assert!(!set.is_interested(&Item::new("2", "Lamp")));

        // Same name, different id: both kept
        set.toggle(&Item::new("2", "Lamp"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_toggled_leaves_original_untouched() {
        let start = set_of(&["1"]);
        let _ = start.toggled(&Item::new("1", "x"));
        assert_eq!(start.len(), 1);
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(set_of(&["1", "2", "3"]), set_of(&["3", "1", "2"]));
        assert_ne!(set_of(&["1", "2"]), set_of(&["1", "3"]));
    }

    #[test]
    fn test_iteration_keeps_flag_order() {
        let set = set_of(&["b", "a", "c"]);
        let order: Vec<&str> = set.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_labels_follow_membership() {
        assert_eq!(interest_button_label(true), "Not Interested");
        assert_eq!(interest_button_label(false), "Interested");
        assert_ne!(interest_badge(true), interest_badge(false));
    }
}
