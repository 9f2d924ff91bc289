//! Sailing between ports and retiring.
use log::{info, warn};

use super::Game;
use crate::catalog::City;
use crate::constants::{LOG_ARRIVED, LOG_DEPARTED, LOG_RETIRED};
use crate::error::Rejection;
use crate::phase::Phase;
use crate::state::VoyageReports;

impl Game {
    /// # Errors
    ///
    /// [`Rejection::WrongPhase`] unless trading, [`Rejection::SameCity`] for
    /// the current port, [`Rejection::Overloaded`] when cargo and guns
    /// exceed the hold.
    pub fn check_depart(&self, city: City) -> Result<(), Rejection> {
        if self.state.phase != Phase::Trading {
            return Err(Rejection::WrongPhase(self.state.phase));
        }
        if self.state.current_city == Some(city) {
            return Err(Rejection::SameCity);
        }
        let free = self.state.free_capacity();
        if free < 0 {
            return Err(Rejection::Overloaded {
                excess: free.unsigned_abs(),
            });
        }
        Ok(())
    }

    /// Put to sea. A month passes and interest compounds before the voyage
    /// encounters roll.
    pub fn depart_for(&mut self, city: City) {
        if let Err(rejection) = self.check_depart(city) {
            warn!("departure rejected: {rejection}");
            return;
        }
        self.state.voyage = VoyageReports::default();
        self.state.current_city = None;
        self.state.destination = Some(city);
        self.state.clock.advance();
        self.state.ledger.apply_interest();
        info!(
            "departing for {city} in {} {}",
            self.state.clock.month, self.state.clock.year
        );
        self.note(LOG_DEPARTED);
        self.move_to(Phase::HostilesApproaching);
        self.drain_deferred();
    }

    /// Make landfall at the destination and open its market.
    pub(super) fn arrive(&mut self) {
        let Some(city) = self.state.destination else {
            warn!("arriving with no destination");
            return;
        };
        self.state.current_city = Some(city);
        self.set_prices();
        info!("arrived at {city}");
        self.note(LOG_ARRIVED);
    }

    /// # Errors
    ///
    /// [`Rejection::WrongPhase`] unless trading, [`Rejection::NotInHongKong`]
    /// elsewhere, [`Rejection::NotRichEnough`] below the threshold.
    pub fn check_retire(&self) -> Result<(), Rejection> {
        if self.state.phase != Phase::Trading {
            return Err(Rejection::WrongPhase(self.state.phase));
        }
        if !self.state.in_hong_kong() {
            return Err(Rejection::NotInHongKong);
        }
        let available = self.state.ledger.cash.saturating_add(self.state.ledger.bank);
        let required = self.config.retirement_threshold;
        if available < required {
            return Err(Rejection::NotRichEnough {
                available,
                required,
            });
        }
        Ok(())
    }

    pub fn retire(&mut self) {
        if let Err(rejection) = self.check_retire() {
            warn!("retirement rejected: {rejection}");
            return;
        }
        info!("retiring with a net worth of {}", self.state.net_worth());
        self.note(LOG_RETIRED);
        self.move_to(Phase::Retirement);
        self.drain_deferred();
    }
}
