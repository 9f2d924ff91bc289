//! Port price tables and the monthly price rolls.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{City, Merchandise};
use crate::numbers::i64_to_u64;
use crate::rng::GameRng;

/// Unit prices at the current port. Empty while at sea before the first landfall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(BTreeMap<Merchandise, u64>);

/// Direction of a local price shock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceShock {
    Drop,
    Jump,
}

impl PriceTable {
    /// Roll a fresh table for `city`: `multiplier / 2 * U(1, 3) * base`.
    #[must_use]
    pub fn generate(city: City, rng: &mut dyn GameRng) -> Self {
        let mut table = BTreeMap::new();
        for merchandise in Merchandise::ALL {
            let roll = i64_to_u64(rng.uniform_int(1, 3));
            let price = city.price_multiplier(merchandise) / 2 * roll * merchandise.base_price();
            table.insert(merchandise, price.max(1));
        }
        Self(table)
    }

    #[must_use]
    pub fn get(&self, merchandise: Merchandise) -> Option<u64> {
        self.0.get(&merchandise).copied()
    }

    pub fn set(&mut self, merchandise: Merchandise, price: u64) {
        self.0.insert(merchandise, price);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Merchandise, u64)> + '_ {
        self.0.iter().map(|(m, p)| (*m, *p))
    }

    /// Apply a shock to a uniformly chosen merchandise and return it.
    ///
    /// A drop divides the price by five, a jump multiplies it by `U(5, 9)`.
    pub fn apply_shock(&mut self, shock: PriceShock, rng: &mut dyn GameRng) -> Option<Merchandise> {
        let index = rng.pick_index(Merchandise::ALL.len())?;
        let merchandise = Merchandise::ALL[index];
        let original = self.get(merchandise)?;
        let price = match shock {
            PriceShock::Drop => original / 5,
            PriceShock::Jump => original.saturating_mul(i64_to_u64(rng.uniform_int(5, 9))),
        };
        self.set(merchandise, price);
        Some(merchandise)
    }

    /// Units of `merchandise` affordable with `cash`, or 0 without a positive price.
    #[must_use]
    pub fn can_afford(&self, merchandise: Merchandise, cash: u64) -> u64 {
        match self.get(merchandise) {
            Some(price) if price > 0 => cash / price,
            _ => 0,
        }
    }

    /// Whether at least one unit of anything is affordable.
    #[must_use]
    pub fn can_afford_any(&self, cash: u64) -> bool {
        self.0.values().any(|price| cash >= *price)
    }
}
