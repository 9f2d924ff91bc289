//! Trading, warehouse, bank and shipyard actions.
//!
//! Every action has a `check_*` twin. The action runs the same check and,
//! when it fails, logs the rejection and leaves the state untouched.
use log::{debug, info, warn};

use super::Game;
use crate::catalog::Merchandise;
use crate::constants::{LOG_GUN_BOUGHT, LOG_MCHENRY_REPAIR, LOG_SHIP_UPGRADED};
use crate::error::Rejection;
use crate::market::PriceTable;
use crate::overrides::ForcedOutcome;
use crate::phase::{Event, Phase};

fn rejected(action: &str, result: Result<(), Rejection>) -> bool {
    match result {
        Ok(()) => false,
        Err(rejection) => {
            warn!("{action} rejected: {rejection}");
            true
        }
    }
}

impl Game {
    /// Roll a fresh price table for the current port.
    pub fn set_prices(&mut self) {
        let Some(city) = self.state.current_city else {
            warn!("no prices at sea");
            return;
        };
        self.state.prices = PriceTable::generate(city, self.rng.as_mut());
        debug!("prices at {city}: {:?}", self.state.prices);
    }

    fn unit_price(&self, merchandise: Merchandise) -> Result<u64, Rejection> {
        if self.state.at_sea() {
            return Err(Rejection::NotDocked);
        }
        self.state.prices.get(merchandise).ok_or(Rejection::NotDocked)
    }

    fn require_hong_kong(&self) -> Result<(), Rejection> {
        if self.state.in_hong_kong() {
            Ok(())
        } else {
            Err(Rejection::NotInHongKong)
        }
    }

    fn require_cargo(
        held: u64,
        merchandise: Merchandise,
        quantity: u64,
    ) -> Result<(), Rejection> {
        if quantity > held {
            return Err(Rejection::InsufficientCargo {
                merchandise,
                requested: quantity,
                available: held,
            });
        }
        Ok(())
    }

    /// Units of `merchandise` the current cash buys.
    #[must_use]
    pub fn can_afford(&self, merchandise: Merchandise) -> u64 {
        self.state.prices.can_afford(merchandise, self.state.ledger.cash)
    }

    #[must_use]
    pub fn can_afford_any(&self) -> bool {
        self.state.prices.can_afford_any(self.state.ledger.cash)
    }

    /// Buying ignores hold space; an overloaded ship simply cannot sail.
    ///
    /// # Errors
    ///
    /// [`Rejection::NotDocked`] at sea, [`Rejection::InsufficientCash`] when
    /// the total exceeds cash.
    pub fn check_buy(&self, merchandise: Merchandise, quantity: u64) -> Result<(), Rejection> {
        let price = self.unit_price(merchandise)?;
        self.state.ledger.check_spend(price.saturating_mul(quantity))
    }

    pub fn buy(&mut self, merchandise: Merchandise, quantity: u64) {
        if rejected("buy", self.check_buy(merchandise, quantity)) {
            return;
        }
        let Ok(price) = self.unit_price(merchandise) else {
            return;
        };
        self.state.ledger.cash -= price.saturating_mul(quantity);
        self.state.hold.add(merchandise, quantity);
        debug!("bought {quantity} {merchandise} at {price}");
    }

    /// # Errors
    ///
    /// [`Rejection::NotDocked`] at sea, [`Rejection::InsufficientCargo`]
    /// when the hold has fewer units.
    pub fn check_sell(&self, merchandise: Merchandise, quantity: u64) -> Result<(), Rejection> {
        self.unit_price(merchandise)?;
        Self::require_cargo(self.state.hold.quantity(merchandise), merchandise, quantity)
    }

    pub fn sell(&mut self, merchandise: Merchandise, quantity: u64) {
        if rejected("sell", self.check_sell(merchandise, quantity)) {
            return;
        }
        let Ok(price) = self.unit_price(merchandise) else {
            return;
        };
        self.state.hold.remove(merchandise, quantity);
        self.state.ledger.cash = self
            .state
            .ledger
            .cash
            .saturating_add(price.saturating_mul(quantity));
        debug!("sold {quantity} {merchandise} at {price}");
    }

    /// Moving cargo aboard does not check hold space.
    ///
    /// # Errors
    ///
    /// [`Rejection::NotInHongKong`] away from the warehouse,
    /// [`Rejection::InsufficientCargo`] when the warehouse is short.
    pub fn check_transfer_to_ship(
        &self,
        merchandise: Merchandise,
        quantity: u64,
    ) -> Result<(), Rejection> {
        self.require_hong_kong()?;
        Self::require_cargo(self.state.warehouse.quantity(merchandise), merchandise, quantity)
    }

    pub fn transfer_to_ship(&mut self, merchandise: Merchandise, quantity: u64) {
        if rejected(
            "transfer to ship",
            self.check_transfer_to_ship(merchandise, quantity),
        ) {
            return;
        }
        self.state.warehouse.remove(merchandise, quantity);
        self.state.hold.add(merchandise, quantity);
    }

    /// # Errors
    ///
    /// [`Rejection::NotInHongKong`], [`Rejection::InsufficientCargo`] when
    /// the hold is short, [`Rejection::WarehouseFull`] without room.
    pub fn check_transfer_to_warehouse(
        &self,
        merchandise: Merchandise,
        quantity: u64,
    ) -> Result<(), Rejection> {
        self.require_hong_kong()?;
        Self::require_cargo(self.state.hold.quantity(merchandise), merchandise, quantity)?;
        let free = self.state.warehouse_free();
        if quantity > free {
            return Err(Rejection::WarehouseFull {
                requested: quantity,
                free,
            });
        }
        Ok(())
    }

    pub fn transfer_to_warehouse(&mut self, merchandise: Merchandise, quantity: u64) {
        if rejected(
            "transfer to warehouse",
            self.check_transfer_to_warehouse(merchandise, quantity),
        ) {
            return;
        }
        self.state.hold.remove(merchandise, quantity);
        self.state.warehouse.add(merchandise, quantity);
    }

    /// # Errors
    ///
    /// See [`crate::Ledger::check_deposit`].
    pub fn check_deposit(&self, amount: u64) -> Result<(), Rejection> {
        self.state.ledger.check_deposit(amount)
    }

    pub fn deposit(&mut self, amount: u64) {
        rejected("deposit", self.state.ledger.deposit(amount));
    }

    /// # Errors
    ///
    /// See [`crate::Ledger::check_withdraw`].
    pub fn check_withdraw(&self, amount: u64) -> Result<(), Rejection> {
        self.state.ledger.check_withdraw(amount)
    }

    pub fn withdraw(&mut self, amount: u64) {
        rejected("withdraw", self.state.ledger.withdraw(amount));
    }

    /// # Errors
    ///
    /// See [`crate::Ledger::check_borrow`].
    pub fn check_borrow(&self, amount: u64) -> Result<(), Rejection> {
        self.state.ledger.check_borrow(amount)
    }

    pub fn borrow(&mut self, amount: u64) {
        rejected("borrow", self.state.ledger.borrow(amount));
    }

    /// # Errors
    ///
    /// See [`crate::Ledger::check_repay`].
    pub fn check_repay(&self, amount: u64) -> Result<(), Rejection> {
        self.state.ledger.check_repay(amount)
    }

    pub fn repay(&mut self, amount: u64) {
        rejected("repay", self.state.ledger.repay(amount));
    }

    /// # Errors
    ///
    /// [`Rejection::NoActiveOffer`] unless McHenry's offer is on screen,
    /// [`Rejection::InsufficientCash`] when `amount` exceeds cash.
    pub fn check_repair(&self, amount: u64) -> Result<(), Rejection> {
        if self.state.phase != Phase::McHenryOffer || self.state.voyage.mchenry_rate.is_none() {
            return Err(Rejection::NoActiveOffer("repair offer"));
        }
        self.state.ledger.check_spend(amount)
    }

    /// Pay McHenry `amount`; the hull is mended by `amount / rate` units.
    pub fn repair(&mut self, amount: u64) {
        if rejected("repair", self.check_repair(amount)) {
            return;
        }
        let Some(rate) = self.state.voyage.mchenry_rate else {
            return;
        };
        let mended = amount / rate.max(1);
        self.state.ship.repair(mended);
        self.state.ledger.cash -= amount;
        info!("McHenry mended {mended} units for {amount}");
        self.note(LOG_MCHENRY_REPAIR);
        self.defer(Event::Repaired);
        self.drain_deferred();
    }

    pub(super) fn accept_bailout(&mut self) {
        let (Some(offer), Some(repay)) = (
            self.state.voyage.bailout_offer,
            self.state.voyage.bailout_repay,
        ) else {
            warn!("no bailout on the table");
            return;
        };
        let ledger = &mut self.state.ledger;
        ledger.cash = ledger.cash.saturating_add(offer);
        ledger.debt = ledger.debt.saturating_add(repay);
    }

    /// Pay for the bigger hull, then maybe get offered a gun as well.
    pub(super) fn upgrade_ship(&mut self) -> Option<Phase> {
        let price = self.state.voyage.offer_amount?;
        if rejected("ship upgrade", self.state.ledger.check_spend(price)) {
            return None;
        }
        self.state.ledger.cash -= price;
        self.state.ship.upgrade();
        info!("upgraded to a {} unit ship", self.state.ship.capacity);
        self.note(LOG_SHIP_UPGRADED);
        if self.chance_or_forced(1, 2, ForcedOutcome::GunOffer) {
            self.gun_offer()
        } else {
            None
        }
    }

    pub(super) fn buy_gun(&mut self) {
        let Some(price) = self.state.voyage.offer_amount else {
            warn!("no gun on the table");
            return;
        };
        if rejected("gun purchase", self.state.ledger.check_spend(price)) {
            return;
        }
        self.state.ledger.cash -= price;
        self.state.ship.guns += 1;
        info!("bought a gun for {price}, {} aboard", self.state.ship.guns);
        self.note(LOG_GUN_BOUGHT);
    }
}
