//! Sea battle sequencing.
//!
//! Each step of a fight is a [`BattleStep`] parked in the scheduler's battle
//! slot. Animations pause the sequence until the presentation acknowledges
//! them through `gun_did_fire`, `targeted_ship_sunk` or `ship_did_get_hit`.
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::Game;
use crate::catalog::Merchandise;
use crate::combat::{Battle, BattleMessage, BattleOrder, HostileType};
use crate::constants::{HOSTILE_SLOTS, LOG_GOT_AWAY, LOG_RAN_AWAY, LOG_SHOOK_OFF};
use crate::error::Rejection;
use crate::overrides::ForcedOutcome;
use crate::phase::Event;

/// What happens when the battle timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "step", content = "count")]
pub enum BattleStep {
    /// Act on the standing order.
    CarryOutOrder,
    /// Re-check the fight, then act on the order after a pause.
    ExecuteOrder,
    EndBattle,
    /// Announce the enemy volley.
    HostileFire,
    /// The enemy volley lands; waits for `ship_did_get_hit`.
    IncomingShot,
    /// First shot of a volley.
    OpenFire,
    /// Pick the target; waits for `gun_did_fire`.
    Aim,
    NextShot,
    Flee(u64),
    GunHit,
    LiYuenArrives,
    RunAttempt,
    ShakeOff,
}

impl Game {
    /// Clear the screen and start executing orders.
    pub(super) fn start_battle(&mut self) {
        let months = self.state.months_elapsed();
        if let Some(battle) = self.state.battle.as_mut() {
            battle.slots = [0; HOSTILE_SLOTS];
            battle.fill_screen(months, self.rng.as_mut());
            battle.escape_chance = 0;
            battle.escape_increment = 1;
        } else {
            warn!("{} entered without a fleet", self.state.phase);
        }
        self.execute_order();
    }

    pub(super) fn end_battle(&mut self) {
        self.scheduler.cancel_battle();
        self.state.battle = None;
    }

    /// A tap skips the wait before the next battle step.
    pub(super) fn hurry_battle(&mut self) {
        if let Some(step) = self.scheduler.take_battle() {
            self.run_battle_step(step);
        }
    }

    pub(super) fn run_battle_step(&mut self, step: BattleStep) {
        if !self.state.phase.is_battle() {
            warn!("dropping {step:?} outside a battle ({})", self.state.phase);
            return;
        }
        match step {
            BattleStep::CarryOutOrder => self.carry_out_order(),
            BattleStep::ExecuteOrder => self.execute_order(),
            BattleStep::EndBattle => self.defer(Event::BattleEnded),
            BattleStep::LiYuenArrives => self.defer(Event::LiYuen),
            BattleStep::HostileFire => self.hostile_fire(),
            BattleStep::IncomingShot => {
                if let Some(battle) = self.state.battle.as_mut() {
                    battle.ship_being_hit = true;
                }
            }
            BattleStep::OpenFire => self.fire_gun(),
            BattleStep::Aim => self.aim(),
            BattleStep::NextShot => self.next_shot(),
            BattleStep::Flee(count) => {
                self.battle_message(BattleMessage::RanAway(count));
                if let Some(battle) = self.state.battle.as_mut() {
                    battle.lose_hostiles(count);
                }
                info!("{count} hostiles ran away");
                self.note(LOG_RAN_AWAY);
                self.schedule_step(BattleStep::HostileFire);
            }
            BattleStep::GunHit => self.gun_hit(),
            BattleStep::RunAttempt => self.run_attempt(),
            BattleStep::ShakeOff => self.shake_off(),
        }
    }

    fn schedule_step(&mut self, step: BattleStep) {
        let delay = self.config.battle.step_ms;
        self.scheduler.schedule_battle(delay, step);
    }

    fn battle_message(&mut self, message: BattleMessage) {
        debug!("battle: {message:?}");
        if let Some(battle) = self.state.battle.as_mut() {
            battle.message = Some(message);
        }
    }

    fn hostiles_left(&self) -> u64 {
        self.state.battle.as_ref().map_or(0, |battle| battle.hostiles)
    }

    fn execute_order(&mut self) {
        if self.state.ship.status() == 0 {
            info!("the ship is wrecked");
            self.defer(Event::BattleEnded);
        } else if self.hostiles_left() == 0 {
            self.battle_message(BattleMessage::GotEmAll);
            self.schedule_step(BattleStep::EndBattle);
        } else {
            self.schedule_step(BattleStep::CarryOutOrder);
        }
    }

    fn carry_out_order(&mut self) {
        let order = self.state.battle.as_ref().and_then(|battle| battle.order);
        match order {
            Some(BattleOrder::Fight) if self.state.ship.guns > 0 => self.fire_guns(),
            Some(BattleOrder::Fight) => {
                self.battle_message(BattleMessage::NoGuns);
                self.schedule_step(BattleStep::HostileFire);
            }
            Some(BattleOrder::Run) => {
                self.battle_message(BattleMessage::WillRun);
                self.schedule_step(BattleStep::RunAttempt);
            }
            Some(BattleOrder::ThrowCargo) => self.schedule_step(BattleStep::RunAttempt),
            None => {
                self.battle_message(BattleMessage::WhatShallWeDo);
                self.schedule_step(BattleStep::HostileFire);
            }
        }
    }

    fn fire_guns(&mut self) {
        let guns = self.state.ship.guns;
        let months = self.state.months_elapsed();
        if let Some(battle) = self.state.battle.as_mut() {
            battle.begin_volley(guns);
            battle.message = Some(BattleMessage::WillFight);
            battle.fill_screen(months, self.rng.as_mut());
        }
        self.schedule_step(BattleStep::OpenFire);
    }

    fn fire_gun(&mut self) {
        self.battle_message(BattleMessage::Firing);
        let delay = self.config.battle.aim_ms;
        self.scheduler.schedule_battle(delay, BattleStep::Aim);
    }

    fn aim(&mut self) {
        let target = self
            .state
            .battle
            .as_mut()
            .and_then(|battle| battle.pick_target(self.rng.as_mut()));
        if target.is_none() {
            debug!("nothing afloat to aim at");
            self.schedule_next_shot();
        }
    }

    fn schedule_next_shot(&mut self) {
        let delay = self.config.battle.reload_ms;
        self.scheduler.schedule_battle(delay, BattleStep::NextShot);
    }

    fn next_shot(&mut self) {
        let Some(battle) = self.state.battle.as_mut() else {
            return;
        };
        battle.shots_left = battle.shots_left.saturating_sub(1);
        if battle.shots_left > 0 && battle.visible_count() > 0 {
            self.fire_gun();
            return;
        }
        battle.message = Some(if battle.sink_count > 0 {
            BattleMessage::Sunk(battle.sink_count)
        } else {
            BattleMessage::HitButDidntSink
        });
        let forced = self.overrides.take(ForcedOutcome::RanAway);
        match battle.roll_flee(forced, self.rng.as_mut()) {
            Some(count) => self.schedule_step(BattleStep::Flee(count)),
            None => self.schedule_step(BattleStep::HostileFire),
        }
    }

    fn hostile_fire(&mut self) {
        self.battle_message(BattleMessage::TheyreFiring);
        self.schedule_step(BattleStep::IncomingShot);
    }

    fn gun_hit(&mut self) {
        self.battle_message(BattleMessage::HitAGun);
        self.state.ship.lose_gun();
        let years = self.state.clock.years_elapsed();
        if let Some(battle) = self.state.battle.as_ref() {
            let damage = battle.gun_hit_damage(years, self.rng.as_mut());
            self.state.ship.take_damage(damage);
        }
        self.schedule_step(BattleStep::ExecuteOrder);
    }

    fn run_attempt(&mut self) {
        let escaped = self
            .state
            .battle
            .as_mut()
            .is_some_and(|battle| battle.roll_escape(self.rng.as_mut()));
        if escaped {
            info!("got away");
            self.note(LOG_GOT_AWAY);
            self.battle_message(BattleMessage::GotAway);
            self.schedule_step(BattleStep::EndBattle);
        } else {
            self.battle_message(BattleMessage::CouldntLoseEm);
            self.schedule_step(BattleStep::ShakeOff);
        }
    }

    fn shake_off(&mut self) {
        let lost = self
            .state
            .battle
            .as_mut()
            .and_then(|battle| battle.roll_shake_off(self.rng.as_mut()));
        match lost {
            Some(lost) => {
                if let Some(battle) = self.state.battle.as_mut() {
                    battle.lose_hostiles(lost);
                }
                info!("shook off {lost} pursuers");
                self.note(LOG_SHOOK_OFF);
                self.battle_message(BattleMessage::EscapedFrom(lost));
                self.schedule_step(BattleStep::HostileFire);
            }
            None => self.hostile_fire(),
        }
    }

    fn fighting(&self, action: &str) -> bool {
        if self.state.phase.is_battle() && self.state.battle.is_some() {
            return true;
        }
        warn!("{action} ignored outside a battle ({})", self.state.phase);
        false
    }

    fn give_order(&mut self, order: BattleOrder) {
        if !self.fighting("order") {
            return;
        }
        debug!("order: {order:?}");
        if let Some(battle) = self.state.battle.as_mut() {
            battle.order = Some(order);
        }
    }

    pub fn order_fight(&mut self) {
        self.give_order(BattleOrder::Fight);
    }

    pub fn order_run(&mut self) {
        self.give_order(BattleOrder::Run);
    }

    /// Pauses the battle until `discard` or `discard_cancelled`.
    pub fn order_throw_cargo(&mut self) {
        if self.fighting("order") {
            self.give_order(BattleOrder::ThrowCargo);
            self.scheduler.cancel_battle();
        }
    }

    /// The gunfire animation finished: land the shot on the target.
    pub fn gun_did_fire(&mut self) {
        if !self.fighting("gun_did_fire") {
            return;
        }
        let Some(battle) = self
            .state
            .battle
            .as_mut()
            .filter(|battle| battle.target.is_some() && !battle.target_sinking)
        else {
            warn!("gun_did_fire with no shot in flight");
            return;
        };
        if !battle.shoot_target(self.rng.as_mut()) {
            self.schedule_next_shot();
        }
        self.drain_deferred();
    }

    /// The sinking animation finished.
    pub fn targeted_ship_sunk(&mut self) {
        if !self.fighting("targeted_ship_sunk") {
            return;
        }
        let Some(battle) = self
            .state
            .battle
            .as_mut()
            .filter(|battle| battle.target_sinking)
        else {
            warn!("targeted_ship_sunk with nothing sinking");
            return;
        };
        battle.finish_sinking();
        if battle.hostiles > 0 {
            self.schedule_next_shot();
        } else {
            info!("sank the whole fleet");
            self.battle_message(BattleMessage::GotEmAll);
            self.schedule_step(BattleStep::EndBattle);
        }
        self.drain_deferred();
    }

    /// The hit animation finished: roll where the enemy volley landed.
    pub fn ship_did_get_hit(&mut self) {
        if !self.fighting("ship_did_get_hit") {
            return;
        }
        let Some(battle) = self
            .state
            .battle
            .as_mut()
            .filter(|battle| battle.ship_being_hit)
        else {
            warn!("ship_did_get_hit with no volley incoming");
            return;
        };
        battle.message = Some(BattleMessage::BeenHit);
        battle.ship_being_hit = false;
        if battle.order == Some(BattleOrder::ThrowCargo) {
            battle.order = None;
        }
        let hostile_type = battle.hostile_type;

        let forced = self.overrides.is_forced(ForcedOutcome::HitGun);
        if Battle::gun_hit(&self.state.ship, forced, self.rng.as_mut()) {
            self.overrides.take(ForcedOutcome::HitGun);
            self.schedule_step(BattleStep::GunHit);
        } else {
            let years = self.state.clock.years_elapsed();
            if let Some(battle) = self.state.battle.as_ref() {
                let damage = battle.hull_damage(years, self.rng.as_mut());
                self.state.ship.take_damage(damage);
                debug!("hull took {damage}, status {}", self.state.ship.status());
            }
            if hostile_type == HostileType::Generic
                && self.chance_or_forced(1, 20, ForcedOutcome::LiYuenDroveThemOff)
            {
                self.schedule_step(BattleStep::LiYuenArrives);
            } else {
                self.execute_order();
            }
        }
        self.drain_deferred();
    }

    /// # Errors
    ///
    /// [`Rejection::WrongPhase`] outside a battle and
    /// [`Rejection::InsufficientCargo`] when the hold is short.
    pub fn check_discard(&self, merchandise: Merchandise, quantity: u64) -> Result<(), Rejection> {
        if !self.state.phase.is_battle() || self.state.battle.is_none() {
            return Err(Rejection::WrongPhase(self.state.phase));
        }
        let available = self.state.hold.quantity(merchandise);
        if quantity > available {
            return Err(Rejection::InsufficientCargo {
                merchandise,
                requested: quantity,
                available,
            });
        }
        Ok(())
    }

    /// Throw cargo overboard to lighten the ship, then carry on.
    pub fn discard(&mut self, merchandise: Merchandise, quantity: u64) {
        if let Err(rejection) = self.check_discard(merchandise, quantity) {
            warn!("discard rejected: {rejection}");
            return;
        }
        self.state.hold.remove(merchandise, quantity);
        if let Some(battle) = self.state.battle.as_mut() {
            battle.escape_chance = battle.escape_chance.saturating_add(quantity / 10);
            battle.message = Some(BattleMessage::HopeWeLoseEm);
        }
        self.execute_order();
        self.drain_deferred();
    }

    /// The player backed out of throwing cargo.
    pub fn discard_cancelled(&mut self) {
        if !self.fighting("discard_cancelled") {
            return;
        }
        if let Some(battle) = self.state.battle.as_mut() {
            battle.order = None;
        }
        self.schedule_step(BattleStep::ExecuteOrder);
    }
}
