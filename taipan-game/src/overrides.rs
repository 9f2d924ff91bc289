//! QA hooks that force specific random outcomes.
//!
//! Forced outcomes are consulted after the regular draw, so the draw sequence
//! is the same with or without them. Each outcome fires once.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedOutcome {
    Bailout,
    Cutthroats,
    ShipOffer,
    GunOffer,
    OpiumSeized,
    WarehouseTheft,
    LiYuenMessage,
    PriceDrop,
    PriceJump,
    Robbery,
    HostileShips,
    LiYuenAttack,
    RanAway,
    HitGun,
    LiYuenDroveThemOff,
    Storm,
    GoingDown,
    BlownOffCourse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugOverrides {
    forced: BTreeSet<ForcedOutcome>,
    li_yuen_demand: Option<u64>,
    hostiles_count: Option<u64>,
}

impl DebugOverrides {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn force(mut self, outcome: ForcedOutcome) -> Self {
        self.forced.insert(outcome);
        self
    }

    #[must_use]
    pub const fn with_li_yuen_demand(mut self, demand: u64) -> Self {
        self.li_yuen_demand = Some(demand);
        self
    }

    #[must_use]
    pub const fn with_hostiles_count(mut self, count: u64) -> Self {
        self.hostiles_count = Some(count);
        self
    }

    /// Whether `outcome` is still armed, without consuming it.
    #[must_use]
    pub fn is_forced(&self, outcome: ForcedOutcome) -> bool {
        self.forced.contains(&outcome)
    }

    /// Consume `outcome`; `true` if it was armed.
    pub fn take(&mut self, outcome: ForcedOutcome) -> bool {
        self.forced.remove(&outcome)
    }

    pub fn take_li_yuen_demand(&mut self) -> Option<u64> {
        self.li_yuen_demand.take()
    }

    pub fn take_hostiles_count(&mut self) -> Option<u64> {
        self.hostiles_count.take()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forced.is_empty() && self.li_yuen_demand.is_none() && self.hostiles_count.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_outcomes_fire_once() {
        let mut overrides = DebugOverrides::none()
            .force(ForcedOutcome::Storm)
            .with_hostiles_count(3);
        assert!(overrides.is_forced(ForcedOutcome::Storm));
        assert!(overrides.take(ForcedOutcome::Storm));
        assert!(!overrides.take(ForcedOutcome::Storm));
        assert_eq!(overrides.take_hostiles_count(), Some(3));
        assert_eq!(overrides.take_hostiles_count(), None);
        assert!(overrides.is_empty());
    }
}
