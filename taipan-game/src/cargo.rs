//! Merchandise inventories for the ship hold and the Hong Kong warehouse.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::Merchandise;

/// Merchandise quantities; a missing entry means zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<Merchandise, u64>);

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn quantity(&self, merchandise: Merchandise) -> u64 {
        self.0.get(&merchandise).copied().unwrap_or(0)
    }

    /// Units across all merchandise.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, q| acc.saturating_add(*q))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn add(&mut self, merchandise: Merchandise, quantity: u64) {
        if quantity == 0 {
            return;
        }
        let entry = self.0.entry(merchandise).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Remove `quantity` units; returns `false` and changes nothing when short.
    pub fn remove(&mut self, merchandise: Merchandise, quantity: u64) -> bool {
        let held = self.quantity(merchandise);
        if quantity > held {
            return false;
        }
        self.set(merchandise, held - quantity);
        true
    }

    pub fn set(&mut self, merchandise: Merchandise, quantity: u64) {
        if quantity == 0 {
            self.0.remove(&merchandise);
        } else {
            self.0.insert(merchandise, quantity);
        }
    }

    pub fn clear(&mut self, merchandise: Merchandise) {
        self.0.remove(&merchandise);
    }

    /// Rewrite every held quantity through `f`.
    pub fn map_quantities(&mut self, mut f: impl FnMut(Merchandise, u64) -> u64) {
        for merchandise in Merchandise::ALL {
            let held = self.quantity(merchandise);
            if held > 0 {
                self.set(merchandise, f(merchandise, held));
            }
        }
    }

    /// Merchandise with a non-zero quantity, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Merchandise, u64)> + '_ {
        self.0.iter().map(|(m, q)| (*m, *q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_refuses_to_go_negative() {
        let mut hold = Inventory::new();
        hold.add(Merchandise::Silk, 5);
        assert!(!hold.remove(Merchandise::Silk, 6));
        assert_eq!(hold.quantity(Merchandise::Silk), 5);
        assert!(hold.remove(Merchandise::Silk, 5));
        assert!(hold.is_empty());
        assert_eq!(hold.iter().count(), 0);
    }

    #[test]
    fn totals_and_mapping() {
        let mut warehouse = Inventory::new();
        warehouse.add(Merchandise::Opium, 10);
        warehouse.add(Merchandise::General, 90);
        assert_eq!(warehouse.total(), 100);
        warehouse.map_quantities(|_, q| q / 2);
        assert_eq!(warehouse.quantity(Merchandise::Opium), 5);
        assert_eq!(warehouse.quantity(Merchandise::General), 45);
        warehouse.map_quantities(|_, _| 0);
        assert!(warehouse.is_empty());
    }
}
