//! Phase entry guards and the arrival and voyage cascades.
//!
//! Entering a phase runs its guard. A guard either accepts the phase (and
//! applies its effect) or names the phase to try next, so a whole cascade
//! is one loop rather than a chain of nested calls.
use log::{debug, error, info};

use super::Game;
use crate::catalog::Merchandise;
use crate::combat::{Battle, HostileType};
use crate::constants::{
    CUTTHROATS_DEBT, GUN_WEIGHT, LI_YUEN_JUST_PAID, LI_YUEN_WANTS_MONEY, LOG_BLOWN_OFF_COURSE,
    LOG_BOOTY, LOG_CUTTHROATS, LOG_GUN_OFFER, LOG_HOSTILES, LOG_LI_YUEN_DEMAND, LOG_LI_YUEN_FLEET,
    LOG_LI_YUEN_MESSAGE, LOG_LI_YUEN_PAID, LOG_MCHENRY_OFFER, LOG_OPIUM_SEIZED, LOG_PRICE_DROP,
    LOG_PRICE_JUMP, LOG_ROBBERY, LOG_SHIP_LOST, LOG_SHIP_OFFER, LOG_STORM, LOG_STORM_SANK,
    LOG_WAREHOUSE_THEFT, LOG_WU_BAILOUT, LOG_WU_BANKRUPTCY, LOG_WU_WARNING, MAX_GUNS, ROBBERY_CASH,
    WU_WARNING_DEBT,
};
use crate::encounters;
use crate::market::PriceShock;
use crate::numbers::u64_to_i64;
use crate::overrides::ForcedOutcome;
use crate::phase::Phase;

/// Outcome of a phase guard.
enum Entry {
    Enter,
    Cascade(Phase),
}

/// Guards never loop back; this only stops a broken guard table.
const CASCADE_LIMIT: usize = 64;

impl Game {
    /// Enter `target`, following guards that decline until one accepts.
    pub fn transition_to(&mut self, target: Phase) {
        self.move_to(target);
        self.drain_deferred();
    }

    pub(super) fn move_to(&mut self, target: Phase) {
        let mut next = target;
        let mut hops = 0;
        while let Entry::Cascade(following) = self.enter(next) {
            debug!("{next} declined, trying {following}");
            next = following;
            hops += 1;
            if hops > CASCADE_LIMIT {
                error!(
                    "cascade from {target} did not settle, staying in {}",
                    self.state.phase
                );
                return;
            }
        }
        debug!("{} -> {next}", self.state.phase);
        self.state.phase = next;
        self.arm_report_timer();
        if next.is_battle() {
            self.start_battle();
        }
    }

    fn enter(&mut self, phase: Phase) -> Entry {
        match phase {
            Phase::LiYuenExtortion => self.enter_li_yuen_extortion(),
            Phase::NotEnoughCash => {
                if self.pay_li_yuen() {
                    Entry::Cascade(Phase::McHenryOffer)
                } else {
                    Entry::Enter
                }
            }
            Phase::McHenryOffer => {
                if self.state.in_hong_kong() && self.state.ship.damage > 0 {
                    self.offer_repairs();
                    Entry::Enter
                } else {
                    Entry::Cascade(Phase::ElderBrotherWuWarning1)
                }
            }
            Phase::ElderBrotherWuWarning1 => {
                if self.state.ledger.debt > WU_WARNING_DEBT && !self.state.wu_warning_issued {
                    info!("Elder Brother Wu is worried about a debt of {}", self.state.ledger.debt);
                    self.note(LOG_WU_WARNING);
                    Entry::Enter
                } else {
                    Entry::Cascade(Phase::ElderBrotherWuBusiness)
                }
            }
            Phase::ElderBrotherWuWarning3 => {
                self.state.wu_warning_issued = true;
                Entry::Enter
            }
            Phase::ElderBrotherWuBusiness => {
                if !self.state.in_hong_kong() {
                    Entry::Cascade(Phase::Cutthroats)
                } else if self.state.is_destitute() || self.overrides.take(ForcedOutcome::Bailout) {
                    Entry::Cascade(Phase::ElderBrotherWuBailout)
                } else {
                    Entry::Enter
                }
            }
            Phase::ElderBrotherWuBailout => {
                self.offer_bailout();
                Entry::Enter
            }
            Phase::Bankruptcy => {
                info!("declined Elder Brother Wu's charity");
                self.note(LOG_WU_BANKRUPTCY);
                Entry::Enter
            }
            Phase::Cutthroats => self.enter_cutthroats(),
            Phase::OpiumSeized => self.enter_opium_seized(),
            Phase::WarehouseTheft => self.enter_warehouse_theft(),
            Phase::LiYuenMessage => self.enter_li_yuen_message(),
            Phase::GoodPrices => Entry::Cascade(self.good_prices()),
            Phase::PriceDrop => {
                self.price_shock(PriceShock::Drop);
                Entry::Enter
            }
            Phase::PriceJump => {
                self.price_shock(PriceShock::Jump);
                Entry::Enter
            }
            Phase::Robbery => self.enter_robbery(),
            Phase::HostilesApproaching => self.enter_hostiles_approaching(),
            Phase::BattleSummary | Phase::LiYuenBattleSummary => {
                self.battle_summary();
                Entry::Enter
            }
            Phase::LiYuenApproaching => {
                self.hostile_ships(HostileType::LiYuen);
                Entry::Enter
            }
            Phase::LiYuenLetUsBe => {
                if self.state.li_yuen_counter > LI_YUEN_WANTS_MONEY {
                    Entry::Enter
                } else {
                    Entry::Cascade(Phase::LiYuenAttacking)
                }
            }
            Phase::Storm => self.enter_storm(),
            Phase::Storm2 => {
                if self.rng.weighted_bool(1, 30)
                    || self.overrides.is_forced(ForcedOutcome::GoingDown)
                {
                    Entry::Enter
                } else {
                    Entry::Cascade(Phase::StormMadeIt)
                }
            }
            Phase::StormGoingDown => {
                let ship = &self.state.ship;
                let sinks = encounters::storm_sinks(ship.damage, ship.capacity, self.rng.as_mut());
                if sinks || self.overrides.take(ForcedOutcome::GoingDown) {
                    info!("the ship is going down in the storm");
                    self.note(LOG_STORM_SANK);
                    Entry::Enter
                } else {
                    Entry::Cascade(Phase::StormMadeIt)
                }
            }
            Phase::StormBlownOffCourse => {
                if self.chance_or_forced(1, 3, ForcedOutcome::BlownOffCourse) {
                    self.blown_off_course();
                    Entry::Enter
                } else {
                    Entry::Cascade(Phase::Arriving)
                }
            }
            _ => Entry::Enter,
        }
    }

    /// Timer expiry (or a tap) in a report phase.
    pub(super) fn report_finished(&mut self, phase: Phase) {
        let next = match phase {
            Phase::Arriving => {
                self.arrive();
                Phase::LiYuenExtortion
            }
            Phase::NotEnoughCash => Phase::BorrowForLiYuen,
            Phase::BorrowedForLiYuen | Phase::ElderBrotherWuPirateWarning => Phase::McHenryOffer,
            Phase::ElderBrotherWuWarning1 => Phase::ElderBrotherWuWarning2,
            Phase::ElderBrotherWuWarning2 => Phase::ElderBrotherWuWarning3,
            Phase::ElderBrotherWuWarning3 => Phase::ElderBrotherWuBusiness,
            Phase::Bankruptcy | Phase::Retirement | Phase::StormGoingDown => Phase::FinalStats,
            Phase::BailoutReaction => Phase::Cutthroats,
            Phase::Cutthroats => self.ship_or_gun_offer().unwrap_or(Phase::OpiumSeized),
            Phase::OpiumSeized => Phase::WarehouseTheft,
            Phase::WarehouseTheft => Phase::LiYuenMessage,
            Phase::LiYuenMessage => Phase::GoodPrices,
            Phase::PriceDrop | Phase::PriceJump => Phase::Robbery,
            Phase::Robbery => Phase::Trading,
            Phase::HostilesApproaching => Phase::SeaBattle,
            Phase::BattleSummary | Phase::LiYuenBattleSummary => {
                if self.state.ship.status() == 0 {
                    Phase::FinalStats
                } else {
                    Phase::Storm
                }
            }
            Phase::LiYuenDroveThemOff => Phase::LiYuenApproaching,
            Phase::LiYuenApproaching => Phase::LiYuenLetUsBe,
            Phase::LiYuenLetUsBe => Phase::Storm,
            Phase::LiYuenAttacking => Phase::LiYuenBattle,
            Phase::Storm => Phase::Storm2,
            Phase::Storm2 => Phase::StormGoingDown,
            Phase::StormMadeIt => Phase::StormBlownOffCourse,
            Phase::StormBlownOffCourse => Phase::Arriving,
            other => {
                error!("{other} has no report expiry");
                return;
            }
        };
        self.move_to(next);
    }

    // Arrival cascade --------------------------------------------------------

    fn enter_li_yuen_extortion(&mut self) -> Entry {
        let wants_money = self.state.in_hong_kong()
            && self.state.ledger.cash > 0
            && self.state.li_yuen_counter == LI_YUEN_WANTS_MONEY;
        if !wants_money {
            return Entry::Cascade(Phase::McHenryOffer);
        }
        let demand = match self.overrides.take_li_yuen_demand() {
            Some(demand) => demand,
            None => encounters::li_yuen_demand(
                self.state.months_elapsed(),
                self.state.ledger.cash,
                self.rng.as_mut(),
            ),
        };
        info!("Li Yuen asks {demand} for the temple");
        self.state.voyage.li_yuen_demand = Some(demand);
        self.note(LOG_LI_YUEN_DEMAND);
        Entry::Enter
    }

    /// Pay the standing demand in full. `false` leaves everything untouched.
    fn pay_li_yuen(&mut self) -> bool {
        let Some(demand) = self.state.voyage.li_yuen_demand else {
            return false;
        };
        if self.state.ledger.check_spend(demand).is_err() {
            debug!("cannot pay Li Yuen {demand} from {}", self.state.ledger.cash);
            return false;
        }
        self.state.ledger.cash -= demand;
        self.state.li_yuen_counter = LI_YUEN_JUST_PAID;
        self.note(LOG_LI_YUEN_PAID);
        true
    }

    fn offer_repairs(&mut self) {
        let rate = encounters::mchenry_rate(
            self.state.months_elapsed(),
            self.state.ship.capacity,
            self.rng.as_mut(),
        );
        let offer = encounters::mchenry_offer(rate, self.state.ship.damage);
        info!("McHenry repairs at {rate} per unit, {offer} for the whole hull");
        self.state.voyage.mchenry_rate = Some(rate);
        self.state.voyage.mchenry_offer = Some(offer);
        self.note(LOG_MCHENRY_OFFER);
    }

    fn offer_bailout(&mut self) {
        self.state.bailout_attempts = self.state.bailout_attempts.saturating_add(1);
        let (offer, repay) =
            encounters::bailout_terms(self.state.bailout_attempts, self.rng.as_mut());
        info!("Elder Brother Wu offers {offer}, to be repaid as {repay}");
        self.state.voyage.bailout_offer = Some(offer);
        self.state.voyage.bailout_repay = Some(repay);
        self.note(LOG_WU_BAILOUT);
    }

    fn enter_cutthroats(&mut self) -> Entry {
        let exposed = self.state.ledger.debt > CUTTHROATS_DEBT && self.state.ledger.cash > 0;
        if exposed && self.chance_or_forced(1, 5, ForcedOutcome::Cutthroats) {
            let lost = encounters::bodyguards_lost(self.rng.as_mut());
            info!("cutthroats took {} cash and {lost} bodyguards", self.state.ledger.cash);
            self.state.ledger.cash = 0;
            self.state.voyage.bodyguards_lost = Some(lost);
            self.note(LOG_CUTTHROATS);
            return Entry::Enter;
        }
        Entry::Cascade(self.ship_or_gun_offer().unwrap_or(Phase::OpiumSeized))
    }

    /// Maybe offer a bigger ship or another gun.
    pub(super) fn ship_or_gun_offer(&mut self) -> Option<Phase> {
        let make_offer = self.rng.weighted_bool(1, 4)
            || self.overrides.is_forced(ForcedOutcome::ShipOffer)
            || self.overrides.is_forced(ForcedOutcome::GunOffer);
        if !make_offer {
            return None;
        }
        if self.chance_or_forced(1, 2, ForcedOutcome::ShipOffer) {
            let price = encounters::ship_offer(
                self.state.months_elapsed(),
                self.state.ship.capacity,
                self.rng.as_mut(),
            );
            if self.state.ledger.cash < price {
                debug!("ship offer of {price} is out of reach");
                return None;
            }
            info!("a bigger ship is offered for {price}");
            self.state.voyage.offer_amount = Some(price);
            self.note(LOG_SHIP_OFFER);
            Some(Phase::NewShipOffer)
        } else {
            self.overrides.take(ForcedOutcome::GunOffer);
            self.gun_offer()
        }
    }

    pub(super) fn gun_offer(&mut self) -> Option<Phase> {
        if self.state.ship.guns >= MAX_GUNS {
            return None;
        }
        let price = encounters::gun_offer(self.state.months_elapsed(), self.rng.as_mut());
        if self.state.ledger.cash < price || self.state.free_capacity() <= u64_to_i64(GUN_WEIGHT) {
            debug!("gun offer of {price} cannot be taken");
            return None;
        }
        info!("a gun is offered for {price}");
        self.state.voyage.offer_amount = Some(price);
        self.note(LOG_GUN_OFFER);
        Some(Phase::NewGunOffer)
    }

    fn enter_opium_seized(&mut self) -> Entry {
        let exposed = self.state.has_opium_aboard() && !self.state.in_hong_kong();
        if exposed && self.chance_or_forced(1, 18, ForcedOutcome::OpiumSeized) {
            let fine = encounters::opium_fine(self.state.ledger.cash, self.rng.as_mut());
            self.state.ledger.seize(fine);
            self.state.hold.clear(Merchandise::Opium);
            info!("customs seized the opium and fined {fine}");
            self.state.voyage.opium_fine = Some(fine);
            self.note(LOG_OPIUM_SEIZED);
            return Entry::Enter;
        }
        Entry::Cascade(Phase::WarehouseTheft)
    }

    fn enter_warehouse_theft(&mut self) -> Entry {
        let stocked = !self.state.warehouse.is_empty();
        if stocked && self.chance_or_forced(1, 50, ForcedOutcome::WarehouseTheft) {
            let rng = self.rng.as_mut();
            self.state
                .warehouse
                .map_quantities(|_, held| encounters::theft_remaining(held, &mut *rng));
            info!("thieves raided the warehouse");
            self.note(LOG_WAREHOUSE_THEFT);
            return Entry::Enter;
        }
        Entry::Cascade(Phase::LiYuenMessage)
    }

    fn enter_li_yuen_message(&mut self) -> Entry {
        self.state.li_yuen_counter =
            encounters::advance_li_yuen_counter(self.state.li_yuen_counter, self.rng.as_mut());
        let waiting =
            !self.state.in_hong_kong() && self.state.li_yuen_counter == LI_YUEN_WANTS_MONEY;
        if waiting && self.chance_or_forced(3, 4, ForcedOutcome::LiYuenMessage) {
            self.note(LOG_LI_YUEN_MESSAGE);
            return Entry::Enter;
        }
        Entry::Cascade(Phase::GoodPrices)
    }

    fn good_prices(&mut self) -> Phase {
        let shock = self.rng.weighted_bool(1, 9)
            || self.overrides.is_forced(ForcedOutcome::PriceDrop)
            || self.overrides.is_forced(ForcedOutcome::PriceJump);
        if !shock {
            return Phase::Robbery;
        }
        if self.rng.weighted_bool(1, 2) || self.overrides.is_forced(ForcedOutcome::PriceDrop) {
            Phase::PriceDrop
        } else {
            Phase::PriceJump
        }
    }

    fn price_shock(&mut self, shock: PriceShock) {
        let (forced, key) = match shock {
            PriceShock::Drop => (ForcedOutcome::PriceDrop, LOG_PRICE_DROP),
            PriceShock::Jump => (ForcedOutcome::PriceJump, LOG_PRICE_JUMP),
        };
        self.overrides.take(forced);
        let merchandise = self.state.prices.apply_shock(shock, self.rng.as_mut());
        match merchandise {
            Some(merchandise) => info!("{merchandise} price {shock:?}"),
            None => debug!("no prices to shock"),
        }
        self.state.voyage.good_price_merchandise = merchandise;
        self.note(key);
    }

    fn enter_robbery(&mut self) -> Entry {
        let flush = self.state.ledger.cash > ROBBERY_CASH;
        if flush && self.chance_or_forced(1, 20, ForcedOutcome::Robbery) {
            let loss = encounters::robbery_loss(self.state.ledger.cash, self.rng.as_mut());
            self.state.ledger.seize(loss);
            info!("robbed of {loss}");
            self.state.voyage.robbery_loss = Some(loss);
            self.note(LOG_ROBBERY);
            return Entry::Enter;
        }
        Entry::Cascade(Phase::Trading)
    }

    // Voyage cascade ---------------------------------------------------------

    fn enter_hostiles_approaching(&mut self) -> Entry {
        let odds = self.state.pirate_odds;
        if self.chance_or_forced(1, odds, ForcedOutcome::HostileShips) {
            self.hostile_ships(HostileType::Generic);
            return Entry::Enter;
        }
        let approaches =
            encounters::li_yuen_approaches(self.state.li_yuen_counter, self.rng.as_mut());
        if approaches || self.overrides.take(ForcedOutcome::LiYuenAttack) {
            Entry::Cascade(Phase::LiYuenApproaching)
        } else {
            Entry::Cascade(Phase::Storm)
        }
    }

    /// Replace any previous fight with a fresh fleet of `hostile_type`.
    fn hostile_ships(&mut self, hostile_type: HostileType) {
        self.end_battle();
        let rolled = match hostile_type {
            HostileType::Generic => Battle::generic_fleet(&self.state.ship, self.rng.as_mut()),
            HostileType::LiYuen => Battle::li_yuen_fleet(&self.state.ship, self.rng.as_mut()),
        };
        let count = self.overrides.take_hostiles_count().unwrap_or(rolled);
        let key = match hostile_type {
            HostileType::Generic => LOG_HOSTILES,
            HostileType::LiYuen => LOG_LI_YUEN_FLEET,
        };
        info!("{count} {hostile_type:?} ships approaching");
        self.state.battle = Some(Battle::new(hostile_type, count));
        self.note(key);
    }

    fn battle_summary(&mut self) {
        let months = self.state.months_elapsed();
        let Some(battle) = self.state.battle.as_mut() else {
            return;
        };
        if battle.hostiles == 0 {
            let booty = battle.roll_booty(months, self.rng.as_mut());
            battle.booty = Some(booty);
            self.state.ledger.cash = self.state.ledger.cash.saturating_add(booty);
            info!("booty of {booty}");
            self.note(LOG_BOOTY);
        } else if self.state.ship.status() == 0 {
            info!("the ship was lost with {} hostiles remaining", battle.hostiles);
            self.note(LOG_SHIP_LOST);
        }
    }

    fn enter_storm(&mut self) -> Entry {
        self.end_battle();
        if self.chance_or_forced(1, 10, ForcedOutcome::Storm) {
            info!("storm, Taipan");
            self.note(LOG_STORM);
            Entry::Enter
        } else {
            Entry::Cascade(Phase::Arriving)
        }
    }

    fn blown_off_course(&mut self) {
        let diverted = encounters::blown_off_course(self.state.destination, self.rng.as_mut());
        if let Some(city) = diverted {
            info!("blown off course to {city}");
            self.state.destination = Some(city);
            self.note(LOG_BLOWN_OFF_COURSE);
        }
    }
}
