//! The player's ship: hold capacity, guns and hull damage.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cargo::Inventory;
use crate::constants::{GUN_WEIGHT, IN_DANGER_STATUS, SHIP_UPGRADE_CAPACITY};
use crate::numbers::u64_to_i64;

/// Hull condition label derived from [`Ship::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipCondition {
    Critical,
    Poor,
    Fair,
    Good,
    Prime,
    Perfect,
}

impl ShipCondition {
    const BUCKETS: [Self; 6] = [
        Self::Critical,
        Self::Poor,
        Self::Fair,
        Self::Good,
        Self::Prime,
        Self::Perfect,
    ];

    #[must_use]
    pub fn from_status(status: u64) -> Self {
        let bucket = usize::try_from(status / 20).unwrap_or(usize::MAX);
        Self::BUCKETS[bucket.min(Self::BUCKETS.len() - 1)]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Prime => "Prime",
            Self::Perfect => "Perfect",
        }
    }
}

impl fmt::Display for ShipCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub capacity: u64,
    /// Always within `0..=capacity`.
    pub damage: u64,
    pub guns: u64,
}

impl Ship {
    #[must_use]
    pub const fn new(capacity: u64) -> Self {
        Self {
            capacity,
            damage: 0,
            guns: 0,
        }
    }

    /// Percent of hull intact: `max(100 - damage*100/capacity, 0)`.
    #[must_use]
    pub fn status(&self) -> u64 {
        if self.capacity == 0 {
            return 0;
        }
        100u64.saturating_sub(self.damage.saturating_mul(100) / self.capacity)
    }

    #[must_use]
    pub fn condition(&self) -> ShipCondition {
        ShipCondition::from_status(self.status())
    }

    #[must_use]
    pub fn in_danger(&self) -> bool {
        self.status() < IN_DANGER_STATUS
    }

    /// Hull damage as a whole percentage of capacity.
    #[must_use]
    pub fn damage_percent(&self) -> u64 {
        if self.capacity == 0 {
            return 100;
        }
        self.damage.saturating_mul(100) / self.capacity
    }

    /// `capacity - guns*10 - cargo`; negative when overloaded.
    #[must_use]
    pub fn free_capacity(&self, hold: &Inventory) -> i64 {
        u64_to_i64(self.capacity)
            - u64_to_i64(self.guns.saturating_mul(GUN_WEIGHT))
            - u64_to_i64(hold.total())
    }

    pub fn take_damage(&mut self, amount: u64) {
        self.damage = self.damage.saturating_add(amount).min(self.capacity);
    }

    pub fn repair(&mut self, amount: u64) {
        self.damage = self.damage.saturating_sub(amount);
    }

    /// Bigger hull from the shipyard: more room, no damage.
    pub fn upgrade(&mut self) {
        self.capacity = self.capacity.saturating_add(SHIP_UPGRADE_CAPACITY);
        self.damage = 0;
    }

    pub fn lose_gun(&mut self) {
        self.guns = self.guns.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Merchandise;

    #[test]
    fn status_buckets() {
        let mut ship = Ship::new(60);
        assert_eq!(ship.status(), 100);
        assert_eq!(ship.condition(), ShipCondition::Perfect);
        ship.take_damage(30);
        assert_eq!(ship.status(), 50);
        assert_eq!(ship.condition(), ShipCondition::Fair);
        assert!(!ship.in_danger());
        ship.take_damage(20);
        assert_eq!(ship.status(), 17);
        assert_eq!(ship.condition(), ShipCondition::Critical);
        assert!(ship.in_danger());
    }

    #[test]
    fn damage_is_clamped_to_capacity() {
        let mut ship = Ship::new(60);
        ship.take_damage(500);
        assert_eq!(ship.damage, 60);
        assert_eq!(ship.status(), 0);
        ship.repair(100);
        assert_eq!(ship.damage, 0);
    }

    #[test]
    fn free_capacity_goes_negative_when_overloaded() {
        let mut ship = Ship::new(60);
        ship.guns = 5;
        let mut hold = Inventory::new();
        hold.add(Merchandise::Silk, 10);
        assert_eq!(ship.free_capacity(&hold), 0);
        hold.add(Merchandise::General, 3);
        assert_eq!(ship.free_capacity(&hold), -3);
    }

    #[test]
    fn upgrade_adds_room_and_clears_damage() {
        let mut ship = Ship::new(60);
        ship.take_damage(12);
        ship.upgrade();
        assert_eq!(ship.capacity, 110);
        assert_eq!(ship.damage, 0);
    }
}
