//! Item name -> count inventory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stackable inventory keyed by item name.
///
/// Counts are unsigned, and entries that reach zero are removed, so an item
/// is present iff the player owns at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, u32>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: &str) -> u32 {
        self.0.get(item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.0.entry(item.into()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Add one of every item in the slice.
    pub fn add_all<S: AsRef<str>>(&mut self, items: &[S]) {
        for item in items {
            self.add(item.as_ref(), 1);
        }
    }

    /// Remove `quantity` of `item`. Returns false (and changes nothing) if
    /// the player does not own that many.
    pub fn remove(&mut self, item: &str, quantity: u32) -> bool {
        let owned = self.count(item);
        if owned < quantity {
            return false;
        }
        if owned == quantity {
            self.0.remove(item);
        } else {
            self.0.insert(item.to_string(), owned - quantity);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|count| *count == 0)
    }

    /// Items the player actually holds, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(name, count)| (name.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_creates_and_increments_entries() {
        let mut inv = Inventory::new();
        inv.add("Sandwich", 1);
        inv.add_all(&["Sandwich", "Coffee"]);
        assert_eq!(inv.count("Sandwich"), 2);
        assert_eq!(inv.count("Coffee"), 1);
    }

    #[test]
    fn remove_refuses_to_go_negative() {
        let mut inv = Inventory::new();
        inv.add("Healing Potion", 1);
        assert!(!inv.remove("Healing Potion", 2));
        assert_eq!(inv.count("Healing Potion"), 1);
        assert!(inv.remove("Healing Potion", 1));
        assert!(inv.is_empty());
    }

    #[test]
    fn zero_count_entries_are_skipped() {
        let inv: Inventory = serde_json::from_str(r#"{"Coffee":0,"Sandwich":3}"#).unwrap();
        let items: Vec<_> = inv.iter().collect();
        assert_eq!(items, vec![("Sandwich", 3)]);
    }
}
