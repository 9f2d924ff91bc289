//! Published session state.
//!
//! Everything a presentation layer renders lives here. The session mutates
//! it only through [`crate::Game`]; callers read it through
//! [`crate::Game::state`] or seed a position with [`crate::Game::from_state`].
use serde::{Deserialize, Serialize};

use crate::cargo::Inventory;
use crate::catalog::{City, Merchandise};
use crate::clock::Clock;
use crate::combat::{Animation, Battle};
use crate::config::GameConfig;
use crate::ledger::Ledger;
use crate::market::PriceTable;
use crate::numbers::u64_to_i64;
use crate::phase::Phase;
use crate::ship::Ship;

/// Values produced by one voyage's encounters. Every field is cleared when
/// the ship next departs so no report shows a stale amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoyageReports {
    pub li_yuen_demand: Option<u64>,
    pub mchenry_rate: Option<u64>,
    pub mchenry_offer: Option<u64>,
    pub bailout_offer: Option<u64>,
    pub bailout_repay: Option<u64>,
    pub bodyguards_lost: Option<u64>,
    /// Price of the ship or gun currently on offer.
    pub offer_amount: Option<u64>,
    pub opium_fine: Option<u64>,
    pub robbery_loss: Option<u64>,
    pub good_price_merchandise: Option<Merchandise>,
}

impl VoyageReports {
    #[must_use]
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub ledger: Ledger,
    pub prices: PriceTable,
    pub hold: Inventory,
    pub warehouse: Inventory,
    pub warehouse_capacity: u64,
    pub ship: Ship,
    pub clock: Clock,
    /// `None` while at sea.
    pub current_city: Option<City>,
    pub destination: Option<City>,
    /// 0 wants money, 1 just paid, 2..=3 waiting.
    pub li_yuen_counter: u8,
    /// Denominator of the per-voyage pirate check.
    pub pirate_odds: i64,
    pub wu_warning_issued: bool,
    pub bailout_attempts: u64,
    pub voyage: VoyageReports,
    pub battle: Option<Battle>,
    /// Keys of the notable things that happened, oldest first.
    pub logs: Vec<String>,
    /// Set when the player declines another game.
    pub session_over: bool,
}

impl GameState {
    /// Docked at Hong Kong in January 1860 with nothing to your name,
    /// waiting for the debt-or-guns choice.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: Phase::DebtOrGuns,
            ledger: Ledger::default(),
            prices: PriceTable::default(),
            hold: Inventory::new(),
            warehouse: Inventory::new(),
            warehouse_capacity: config.warehouse_capacity,
            ship: Ship::new(config.initial_capacity),
            clock: Clock::default(),
            current_city: Some(City::HongKong),
            destination: None,
            li_yuen_counter: 0,
            pirate_odds: config.starts.debt.pirate_odds,
            wu_warning_issued: false,
            bailout_attempts: 0,
            voyage: VoyageReports::default(),
            battle: None,
            logs: Vec::new(),
            session_over: false,
        }
    }

    #[must_use]
    pub fn months_elapsed(&self) -> u64 {
        self.clock.months_elapsed()
    }

    /// Hold room left after guns and cargo; negative when overloaded.
    #[must_use]
    pub fn free_capacity(&self) -> i64 {
        self.ship.free_capacity(&self.hold)
    }

    #[must_use]
    pub fn warehouse_free(&self) -> u64 {
        self.warehouse_capacity.saturating_sub(self.warehouse.total())
    }

    #[must_use]
    pub fn net_worth(&self) -> i64 {
        self.ledger.net_worth()
    }

    /// `net worth / 100 / months`, with months floored at 1.
    #[must_use]
    pub fn score(&self) -> i64 {
        let months = u64_to_i64(self.months_elapsed().max(1));
        self.net_worth() / 100 / months
    }

    #[must_use]
    pub fn in_hong_kong(&self) -> bool {
        self.current_city.is_some_and(City::is_hong_kong)
    }

    #[must_use]
    pub const fn at_sea(&self) -> bool {
        self.current_city.is_none()
    }

    #[must_use]
    pub fn has_opium_aboard(&self) -> bool {
        self.hold.quantity(Merchandise::Opium) > 0
    }

    /// No cash, no savings, no guns, no cargo anywhere.
    #[must_use]
    pub fn is_destitute(&self) -> bool {
        self.ledger.cash == 0
            && self.ledger.bank == 0
            && self.ship.guns == 0
            && self.hold.is_empty()
            && self.warehouse.is_empty()
    }

    #[must_use]
    pub const fn is_under_attack(&self) -> bool {
        self.phase.is_battle()
    }

    #[must_use]
    pub fn pending_animation(&self) -> Option<Animation> {
        self.battle.as_ref().and_then(Battle::pending_animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_matches_new_game() {
        let state = GameState::new(&GameConfig::default());
        assert_eq!(state.phase, Phase::DebtOrGuns);
        assert_eq!(state.ship.capacity, 60);
        assert_eq!(state.free_capacity(), 60);
        assert_eq!(state.warehouse_free(), 10_000);
        assert!(state.in_hong_kong());
        assert!(state.is_destitute());
        assert!(state.voyage.is_clear());
    }

    #[test]
    fn score_divides_by_months_with_floor_of_one() {
        let mut state = GameState::new(&GameConfig::default());
        state.ledger.cash = 100_000;
        assert_eq!(state.score(), 1000);
        state.clock.year = 1861;
        state.ledger.bank = 20_000;
        state.ledger.debt = 0;
        assert_eq!(state.score(), 100);
    }
}
