//! Event dispatch on `(phase, event)`.
use log::{debug, info, warn};

use super::Game;
use crate::config::StartOption;
use crate::constants::{LI_YUEN_JUST_PAID, LOG_LI_YUEN_BORROWED};
use crate::phase::{Event, Phase};
use crate::state::GameState;

impl Game {
    /// Deliver a user choice or timer expiry. Pairs with no meaning in the
    /// current phase are logged and change nothing.
    pub fn send_event(&mut self, event: Event) {
        self.dispatch(event);
        self.drain_deferred();
    }

    pub(super) fn dispatch(&mut self, event: Event) {
        let phase = self.state.phase;
        if self.state.session_over {
            warn!("session is over, ignoring {event}");
            return;
        }
        debug!("received {event} in {phase}");
        match (phase, event) {
            (Phase::DebtOrGuns, Event::Debt) => self.start(StartOption::Debt),
            (Phase::DebtOrGuns, Event::Guns) => self.start(StartOption::Guns),

            (report, Event::Tap | Event::Timer) if report.report_length().is_some() => {
                self.scheduler.cancel_report();
                self.report_finished(report);
            }
            (battle, Event::Tap) if battle.is_battle() => self.hurry_battle(),

            (Phase::LiYuenExtortion, Event::Yes) => self.move_to(Phase::NotEnoughCash),
            (Phase::LiYuenExtortion, Event::No) => self.move_to(Phase::McHenryOffer),

            (Phase::BorrowForLiYuen, Event::Yes) => {
                self.borrow_for_li_yuen();
                self.move_to(Phase::BorrowedForLiYuen);
            }
            (Phase::BorrowForLiYuen, Event::No) => {
                self.move_to(Phase::ElderBrotherWuPirateWarning);
            }

            (Phase::McHenryOffer, Event::No | Event::Repaired) => {
                self.move_to(Phase::ElderBrotherWuWarning1);
            }

            (Phase::ElderBrotherWuBusiness, Event::No) => self.move_to(Phase::Cutthroats),

            (Phase::ElderBrotherWuBailout, Event::Yes) => {
                self.accept_bailout();
                self.move_to(Phase::BailoutReaction);
            }
            (Phase::ElderBrotherWuBailout, Event::No) => self.move_to(Phase::Bankruptcy),

            (Phase::NewShipOffer, Event::Yes) => {
                let next = self.upgrade_ship().unwrap_or(Phase::OpiumSeized);
                self.move_to(next);
            }
            (Phase::NewShipOffer, Event::No) => self.move_to(Phase::OpiumSeized),
            (Phase::NewGunOffer, Event::Yes) => {
                self.buy_gun();
                self.move_to(Phase::OpiumSeized);
            }
            (Phase::NewGunOffer, Event::No) => self.move_to(Phase::OpiumSeized),

            (Phase::SeaBattle, Event::BattleEnded) => self.move_to(Phase::BattleSummary),
            (Phase::SeaBattle, Event::LiYuen) => self.move_to(Phase::LiYuenDroveThemOff),
            (Phase::LiYuenBattle, Event::BattleEnded) => {
                self.move_to(Phase::LiYuenBattleSummary);
            }

            (Phase::FinalStats, Event::No) => {
                info!("session over with score {}", self.state.score());
                self.scheduler.clear();
                self.state.session_over = true;
            }
            (Phase::FinalStats, Event::Yes) => self.restart(),

            _ => warn!("illegal event {event} in {phase}"),
        }
    }

    fn start(&mut self, option: StartOption) {
        let preset = self.config.starts.preset(option).clone();
        info!("starting with {option}: {preset:?}");
        self.state.ledger.cash = preset.cash;
        self.state.ledger.debt = preset.debt;
        self.state.ship.capacity = self.config.initial_capacity;
        self.state.ship.guns = preset.guns;
        self.state.li_yuen_counter = preset.li_yuen_counter;
        self.state.pirate_odds = preset.pirate_odds;
        self.set_prices();
        self.move_to(Phase::LiYuenExtortion);
    }

    /// Wipe the campaign and wait for a new debt-or-guns choice.
    fn restart(&mut self) {
        info!("starting over");
        self.scheduler.clear();
        self.deferred.clear();
        self.state = GameState::new(&self.config);
    }

    /// Wu covers the part of Li Yuen's demand that cash cannot.
    pub(super) fn borrow_for_li_yuen(&mut self) {
        let Some(demand) = self.state.voyage.li_yuen_demand else {
            warn!("no Li Yuen demand to borrow for");
            return;
        };
        let ledger = &mut self.state.ledger;
        ledger.debt = ledger
            .debt
            .saturating_add(demand.saturating_sub(ledger.cash));
        ledger.cash = 0;
        self.state.li_yuen_counter = LI_YUEN_JUST_PAID;
        self.note(LOG_LI_YUEN_BORROWED);
    }
}
