use colored::Colorize;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use taipan_game::{
    Animation, City, Event, Game, GameState, Merchandise, Phase, StartOption,
};

use super::seeds::SeedInfo;

/// Upper bound on inputs spent settling one port or voyage.
const MAX_STEPS_PER_LEG: usize = 5_000;

/// Outcome of one autopilot campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignRecord {
    pub seed_code: String,
    pub seed: u64,
    pub start: StartOption,
    pub passed: bool,
    pub voyages: usize,
    pub steps: usize,
    pub final_phase: String,
    pub final_city: Option<String>,
    pub months: u64,
    pub cash: u64,
    pub bank: u64,
    pub debt: u64,
    pub net_worth: i64,
    pub score: i64,
    pub guns: u64,
    pub capacity: u64,
    /// How often each log key was written during the campaign.
    pub encounters: BTreeMap<String, usize>,
    pub digest: String,
    pub failures: Vec<String>,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

fn serialize_duration<S: serde::Serializer>(
    value: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(value.as_millis())
}

/// Plays seeded campaigns with a fixed policy: pay Li Yuen when possible,
/// repair when affordable, take cheap upgrades, fight with guns and run
/// without, and ship the cheapest goods around the ports.
#[derive(Debug, Clone)]
pub struct Autopilot {
    voyages: usize,
    verbose: bool,
}

struct Run {
    game: Game,
    steps: usize,
    failures: Vec<String>,
}

impl Autopilot {
    pub const fn new(voyages: usize, verbose: bool) -> Self {
        Self { voyages, verbose }
    }

    pub fn play(&self, info: &SeedInfo) -> CampaignRecord {
        let started = Instant::now();
        let mut run = Run {
            game: Game::from_seed(info.seed),
            steps: 0,
            failures: Vec::new(),
        };
        run.game.send_event(match info.start {
            StartOption::Debt => Event::Debt,
            StartOption::Guns => Event::Guns,
        });
        run.settle();

        let mut voyages = 0;
        while voyages < self.voyages && run.failures.is_empty() {
            if run.game.state().phase != Phase::Trading {
                break;
            }
            if run.game.check_retire().is_ok() {
                run.game.retire();
                run.settle();
                break;
            }
            run.trade();
            let Some(destination) = next_port(run.game.state()) else {
                break;
            };
            if let Err(rejection) = run.game.check_depart(destination) {
                run.failures
                    .push(format!("could not leave for {destination}: {rejection}"));
                break;
            }
            run.game.depart_for(destination);
            voyages += 1;
            run.settle();
            if self.verbose {
                let state = run.game.state();
                println!(
                    "   {} voyage {voyages}: {} cash {} debt {}",
                    info.share_code().bright_white(),
                    state.phase,
                    state.ledger.cash,
                    state.ledger.debt
                );
            }
        }

        record(info, voyages, run, started.elapsed())
    }
}

fn record(info: &SeedInfo, voyages: usize, run: Run, duration: Duration) -> CampaignRecord {
    let state = run.game.state();
    let mut encounters = BTreeMap::new();
    for key in &state.logs {
        *encounters.entry(key.clone()).or_insert(0) += 1;
    }
    CampaignRecord {
        seed_code: info.share_code(),
        seed: info.seed,
        start: info.start,
        passed: run.failures.is_empty(),
        voyages,
        steps: run.steps,
        final_phase: state.phase.to_string(),
        final_city: state.current_city.map(|city| city.to_string()),
        months: state.months_elapsed(),
        cash: state.ledger.cash,
        bank: state.ledger.bank,
        debt: state.ledger.debt,
        net_worth: state.net_worth(),
        score: state.score(),
        guns: state.ship.guns,
        capacity: state.ship.capacity,
        encounters,
        digest: format!("{:016x}", run.game.digest()),
        failures: run.failures,
        duration,
    }
}

/// The port after the current one in the usual sailing order.
fn next_port(state: &GameState) -> Option<City> {
    let here = state.current_city?;
    let index = City::ALL.iter().position(|city| *city == here)?;
    Some(City::ALL[(index + 1) % City::ALL.len()])
}

/// Problems the published state should never show.
pub fn invariant_violations(state: &GameState) -> Vec<String> {
    let mut problems = Vec::new();
    if state.ship.damage > state.ship.capacity {
        problems.push(format!(
            "damage {} exceeds capacity {}",
            state.ship.damage, state.ship.capacity
        ));
    }
    if state.warehouse.total() > state.warehouse_capacity {
        problems.push(format!(
            "warehouse holds {} of {}",
            state.warehouse.total(),
            state.warehouse_capacity
        ));
    }
    if state.phase == Phase::Trading && (state.at_sea() || state.prices.is_empty()) {
        problems.push("trading without a market".to_string());
    }
    if let Some(battle) = state.battle.as_ref()
        && battle.visible_count() > battle.hostiles
    {
        problems.push(format!(
            "{} ships on screen but only {} hostiles",
            battle.visible_count(),
            battle.hostiles
        ));
    }
    problems
}

impl Run {
    /// Drive the session until it waits in the market or the game ends.
    fn settle(&mut self) {
        for _ in 0..MAX_STEPS_PER_LEG {
            let problems = invariant_violations(self.game.state());
            if !problems.is_empty() {
                let phase = self.game.state().phase;
                self.failures
                    .extend(problems.into_iter().map(|p| format!("{phase}: {p}")));
                return;
            }
            let phase = self.game.state().phase;
            match phase {
                Phase::Trading | Phase::FinalStats => return,
                _ if phase.is_battle() => self.battle_step(),
                _ if phase.is_prompt() => self.answer(phase),
                _ => {
                    if !self.game.fire_next_timer() {
                        self.failures.push(format!("{phase} has no timer"));
                        return;
                    }
                }
            }
            self.steps += 1;
            if self.game.state().phase == phase && phase.is_prompt() {
                self.failures.push(format!("{phase} ignored its answer"));
                return;
            }
        }
        let phase = self.game.state().phase;
        self.failures.push(format!("stalled in {phase}"));
    }

    fn answer(&mut self, phase: Phase) {
        let state = self.game.state();
        let cash = state.ledger.cash;
        let voyage = &state.voyage;
        debug!("answering {phase}");
        match phase {
            Phase::LiYuenExtortion => {
                let pay = voyage.li_yuen_demand.is_some_and(|demand| demand <= cash);
                self.game.send_event(if pay { Event::Yes } else { Event::No });
            }
            Phase::BorrowForLiYuen | Phase::ElderBrotherWuBailout => {
                self.game.send_event(Event::Yes);
            }
            Phase::McHenryOffer => {
                let bill = voyage.mchenry_offer.unwrap_or(0).min(cash);
                if bill > 0 && self.game.check_repair(bill).is_ok() {
                    self.game.repair(bill);
                }
                if self.game.state().phase == Phase::McHenryOffer {
                    self.game.send_event(Event::No);
                }
            }
            Phase::ElderBrotherWuBusiness => {
                let debt = state.ledger.debt;
                if debt > 0 && cash > debt.saturating_mul(2) {
                    self.game.repay(debt);
                }
                self.game.send_event(Event::No);
            }
            Phase::NewShipOffer | Phase::NewGunOffer => {
                let affordable = voyage
                    .offer_amount
                    .is_some_and(|price| price.saturating_mul(3) <= cash);
                self.game
                    .send_event(if affordable { Event::Yes } else { Event::No });
            }
            other => self.game.send_event(if other == Phase::DebtOrGuns {
                Event::Debt
            } else {
                Event::No
            }),
        }
    }

    fn battle_step(&mut self) {
        let state = self.game.state();
        let unordered = state.battle.as_ref().is_some_and(|b| b.order.is_none());
        if unordered {
            if state.ship.guns > 0 {
                self.game.order_fight();
            } else {
                self.game.order_run();
            }
        }
        match self.game.state().pending_animation() {
            Some(Animation::GunFire) => self.game.gun_did_fire(),
            Some(Animation::Sinking) => self.game.targeted_ship_sunk(),
            Some(Animation::ShipHit) => self.game.ship_did_get_hit(),
            None => {
                if !self.game.fire_next_timer() {
                    self.failures.push("battle stalled".to_string());
                }
            }
        }
    }

    /// Sell the hold, then fill it with whatever is cheapest against its usual price.
    fn trade(&mut self) {
        let held: Vec<(Merchandise, u64)> = self
            .game
            .state()
            .hold
            .iter()
            .filter(|(_, quantity)| *quantity > 0)
            .collect();
        for (merchandise, quantity) in held {
            self.game.sell(merchandise, quantity);
        }

        let state = self.game.state();
        let bargain = state
            .prices
            .iter()
            .min_by_key(|(merchandise, price)| {
                price.saturating_mul(100) / merchandise.base_price()
            });
        let room = u64::try_from(state.free_capacity()).unwrap_or(0);
        if let Some((merchandise, _)) = bargain {
            let quantity = self.game.can_afford(merchandise).min(room);
            if quantity > 0 {
                self.game.buy(merchandise, quantity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaigns_replay_identically() {
        let pilot = Autopilot::new(6, false);
        let info = SeedInfo::from_numeric(1860, StartOption::Debt);
        let first = pilot.play(&info);
        let second = pilot.play(&info);
        assert!(first.passed, "{:?}", first.failures);
        assert_eq!(first.digest, second.digest);
        assert_eq!(first.encounters, second.encounters);
    }

    #[test]
    fn guns_start_is_honoured() {
        let pilot = Autopilot::new(0, false);
        let record = pilot.play(&SeedInfo::from_numeric(5, StartOption::Guns));
        assert_eq!(record.start, StartOption::Guns);
        assert_eq!(record.voyages, 0);
        assert!(record.guns >= 5 || record.final_phase != "trading");
    }

    #[test]
    fn ports_rotate() {
        let mut state = GameState::new(&taipan_game::GameConfig::default());
        assert_eq!(next_port(&state), Some(City::Shanghai));
        state.current_city = Some(City::Batavia);
        assert_eq!(next_port(&state), Some(City::HongKong));
        state.current_city = None;
        assert_eq!(next_port(&state), None);
    }
}
