//! Sea battle state: the hostile fleet, the visible slots and the rolls
//! that resolve each shot, flight and escape.
//!
//! Sequencing (which roll happens after which delay) lives in the session;
//! this module only owns the numbers.
use serde::{Deserialize, Serialize};

use crate::constants::{
    FIGHT_ESCAPE_CHANCE, FLEE_FACTOR, GUN_HIT_DAMAGE_PERCENT, HIT_HOSTILE_CAP, HOSTILE_HEALTH_BASE,
    HOSTILE_SLOTS, MAX_GENERIC_HOSTILES, SHOT_DAMAGE_MAX, SHOT_DAMAGE_MIN,
};
use crate::numbers::{floor_f64_to_u64, i64_to_u64, u64_to_f64, u64_to_i64};
use crate::rng::GameRng;
use crate::ship::Ship;

/// Who is attacking. Li Yuen's ships are twice as stubborn and hit twice as hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostileType {
    Generic,
    LiYuen,
}

impl HostileType {
    #[must_use]
    pub const fn weight(self) -> u64 {
        match self {
            Self::Generic => 1,
            Self::LiYuen => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOrder {
    Fight,
    Run,
    ThrowCargo,
}

/// Line the crew reports during the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "count")]
pub enum BattleMessage {
    GotEmAll,
    NoGuns,
    WillRun,
    WhatShallWeDo,
    WillFight,
    Firing,
    Sunk(u64),
    HitButDidntSink,
    RanAway(u64),
    TheyreFiring,
    BeenHit,
    HitAGun,
    GotAway,
    CouldntLoseEm,
    EscapedFrom(u64),
    HopeWeLoseEm,
}

/// Animation the presentation must finish and acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animation {
    /// Acknowledge with `gun_did_fire`.
    GunFire,
    /// Acknowledge with `targeted_ship_sunk`.
    Sinking,
    /// Acknowledge with `ship_did_get_hit`.
    ShipHit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub hostile_type: HostileType,
    pub hostiles: u64,
    pub original_hostiles: u64,
    /// Health per visible slot; 0 is an empty slot.
    pub slots: [i64; HOSTILE_SLOTS],
    pub order: Option<BattleOrder>,
    pub message: Option<BattleMessage>,
    pub shots_left: u64,
    pub target: Option<usize>,
    pub target_sinking: bool,
    pub sink_count: u64,
    pub ship_being_hit: bool,
    pub escape_chance: u64,
    pub escape_increment: u64,
    pub booty: Option<u64>,
}

impl Battle {
    #[must_use]
    pub const fn new(hostile_type: HostileType, hostiles: u64) -> Self {
        Self {
            hostile_type,
            hostiles,
            original_hostiles: hostiles,
            slots: [0; HOSTILE_SLOTS],
            order: None,
            message: None,
            shots_left: 0,
            target: None,
            target_sinking: false,
            sink_count: 0,
            ship_being_hit: false,
            escape_chance: 0,
            escape_increment: 1,
            booty: None,
        }
    }

    /// Generic pirates: `min(U(2, capacity/10 + guns), 9999)`, at least two.
    pub fn generic_fleet(ship: &Ship, rng: &mut dyn GameRng) -> u64 {
        let high = ship.capacity / 10 + ship.guns;
        i64_to_u64(rng.uniform_int(2, u64_to_i64(high))).min(MAX_GENERIC_HOSTILES)
    }

    /// Li Yuen's fleet: `5 + U(0, capacity/5 + guns)`.
    pub fn li_yuen_fleet(ship: &Ship, rng: &mut dyn GameRng) -> u64 {
        let high = ship.capacity / 5 + ship.guns;
        5 + i64_to_u64(rng.uniform_int(0, u64_to_i64(high)))
    }

    /// Ships on screen, counting one that is still going down.
    #[must_use]
    pub fn visible_count(&self) -> u64 {
        let afloat = self.slots.iter().filter(|health| **health > 0).count() as u64;
        afloat + u64::from(self.target_sinking)
    }

    #[cfg(test)]
    pub(crate) fn slot_visible(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|health| *health > 0)
            || (self.target == Some(slot) && self.target_sinking)
    }

    /// Place hostiles into empty slots until every remaining hostile is shown
    /// or the screen is full.
    pub fn fill_screen(&mut self, months: u64, rng: &mut dyn GameRng) {
        let mut to_place = self.hostiles.saturating_sub(self.visible_count());
        let spread = 20 + u64_to_i64(months).saturating_mul(10);
        for slot in &mut self.slots {
            if to_place == 0 {
                break;
            }
            if *slot <= 0 {
                *slot = HOSTILE_HEALTH_BASE + rng.uniform_int(0, spread);
                to_place -= 1;
            }
        }
    }

    /// Arm a new volley with one shot per gun.
    pub fn begin_volley(&mut self, guns: u64) {
        self.shots_left = guns;
        self.sink_count = 0;
        self.escape_chance = FIGHT_ESCAPE_CHANCE;
        self.escape_increment = 1;
    }

    /// Pick a uniformly random ship afloat as the next target.
    pub fn pick_target(&mut self, rng: &mut dyn GameRng) -> Option<usize> {
        let afloat: Vec<usize> = (0..HOSTILE_SLOTS).filter(|i| self.slots[*i] > 0).collect();
        let choice = rng.pick_index(afloat.len()).map(|i| afloat[i]);
        self.target = choice;
        choice
    }

    /// Land a `U(10, 40)` shot on the target. Returns `true` when it sinks.
    pub fn shoot_target(&mut self, rng: &mut dyn GameRng) -> bool {
        let Some(slot) = self.target else {
            return false;
        };
        let damage = rng.uniform_int(SHOT_DAMAGE_MIN, SHOT_DAMAGE_MAX);
        self.slots[slot] -= damage;
        if self.slots[slot] <= 0 {
            self.slots[slot] = 0;
            self.target_sinking = true;
            true
        } else {
            self.target = None;
            false
        }
    }

    /// The sinking animation finished: the ship is gone for good.
    pub fn finish_sinking(&mut self) {
        self.target = None;
        self.target_sinking = false;
        self.sink_count += 1;
        self.hostiles = self.hostiles.saturating_sub(1);
    }

    /// After a volley some hostiles may lose heart and leave.
    pub fn roll_flee(&mut self, forced: bool, rng: &mut dyn GameRng) -> Option<u64> {
        let weight = self.hostile_type.weight();
        let numerator =
            floor_f64_to_u64(u64_to_f64(self.hostiles) * FLEE_FACTOR / u64_to_f64(weight));
        let fled = rng.weighted_bool(u64_to_i64(numerator), u64_to_i64(self.original_hostiles));
        if !(fled || forced) {
            return None;
        }
        let high = (self.hostiles / 3 / weight).max(1);
        let count = i64_to_u64(rng.uniform_int(1, u64_to_i64(high)));
        Some(count.min(self.hostiles))
    }

    /// Remove `count` hostiles from the fleet and from the screen.
    pub fn lose_hostiles(&mut self, count: u64) {
        self.hostiles = self.hostiles.saturating_sub(count);
        self.refresh_screen();
    }

    /// Clear surplus slots from the end once fewer hostiles remain than fit.
    pub fn refresh_screen(&mut self) {
        if self.hostiles >= HOSTILE_SLOTS as u64 {
            return;
        }
        let mut count = self.visible_count();
        for slot in self.slots.iter_mut().rev() {
            if count > self.hostiles && *slot > 0 {
                count -= 1;
                *slot = 0;
            }
        }
    }

    /// One escape attempt; each try makes the next more likely.
    pub fn roll_escape(&mut self, rng: &mut dyn GameRng) -> bool {
        self.escape_chance += self.escape_increment;
        self.escape_increment += 1;
        let ours = rng.uniform_int(0, u64_to_i64(self.escape_chance) - 1);
        let theirs = rng.uniform_int(0, u64_to_i64(self.hostiles) - 1);
        ours > theirs
    }

    /// After a failed escape a few pursuers may still be shaken off.
    pub fn roll_shake_off(&mut self, rng: &mut dyn GameRng) -> Option<u64> {
        if self.hostiles <= 2 || !rng.weighted_bool(1, 5) {
            return None;
        }
        let high = (self.hostiles / 2).saturating_sub(1).max(1);
        let lost = i64_to_u64(rng.uniform_int(1, u64_to_i64(high)));
        Some(lost.min(self.hostiles - 1))
    }

    /// Whether the enemy volley knocks out a gun instead of hitting the hull.
    pub fn gun_hit(ship: &Ship, forced: bool, rng: &mut dyn GameRng) -> bool {
        if ship.guns == 0 {
            return false;
        }
        ship.damage_percent() > GUN_HIT_DAMAGE_PERCENT
            || rng.weighted_bool(u64_to_i64(ship.damage), u64_to_i64(ship.capacity))
            || forced
    }

    fn fire_factors(&self, years_elapsed: u64) -> (f64, f64, f64) {
        let escalation = u64_to_f64(years_elapsed + 1) * 0.5;
        let attackers = u64_to_f64(self.hostiles.min(HIT_HOSTILE_CAP));
        let type_weight = u64_to_f64(self.hostile_type.weight());
        (escalation, attackers, type_weight)
    }

    /// Hull damage when the enemy hits the hull.
    pub fn hull_damage(&self, years_elapsed: u64, rng: &mut dyn GameRng) -> u64 {
        let (escalation, attackers, type_weight) = self.fire_factors(years_elapsed);
        let spread = rng.uniform_real(0.0, escalation * attackers * type_weight);
        floor_f64_to_u64(spread + attackers / 2.0)
    }

    /// Hull damage that comes with losing a gun.
    pub fn gun_hit_damage(&self, years_elapsed: u64, rng: &mut dyn GameRng) -> u64 {
        let (escalation, attackers, type_weight) = self.fire_factors(years_elapsed);
        let spread = rng.uniform_real(0.0, escalation * type_weight);
        floor_f64_to_u64(spread + attackers / 2.0)
    }

    /// Prize money for sinking the whole fleet.
    pub fn roll_booty(&self, months: u64, rng: &mut dyn GameRng) -> u64 {
        let scaled = months.saturating_mul(250).saturating_mul(self.original_hostiles);
        250 + scaled + i64_to_u64(rng.uniform_int(0, 1000))
    }

    /// Which callback the presentation owes the session, if any.
    #[must_use]
    pub const fn pending_animation(&self) -> Option<Animation> {
        if self.target_sinking {
            Some(Animation::Sinking)
        } else if self.target.is_some() {
            Some(Animation::GunFire)
        } else if self.ship_being_hit {
            Some(Animation::ShipHit)
        } else {
            None
        }
    }
}
