//! The owned game session.
//!
//! [`Game`] wraps the published [`GameState`] together with everything that
//! drives it: the injected random source, the one-shot debug overrides and
//! the virtual-clock scheduler. Callers change state only through events,
//! player actions and the animation callbacks; every entry point finishes
//! by draining the events the session raised for itself.
mod battle;
mod dispatch;
mod economy;
mod snapshot;
mod transition;
mod voyage;

use log::debug;
use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::overrides::{DebugOverrides, ForcedOutcome};
use crate::phase::Event;
use crate::rng::{GameRng, SeededRng};
use crate::scheduler::{Fired, Scheduler};
use crate::state::GameState;

pub use battle::BattleStep;
pub use snapshot::{GameSnapshot, TimerSnapshot};

#[derive(Debug)]
pub struct Game {
    state: GameState,
    config: GameConfig,
    rng: Box<dyn GameRng>,
    overrides: DebugOverrides,
    scheduler: Scheduler<BattleStep>,
    /// Events raised while another one is being handled.
    deferred: VecDeque<Event>,
}

impl Game {
    /// Fresh session waiting for the debt-or-guns choice.
    #[must_use]
    pub fn new(config: GameConfig, rng: Box<dyn GameRng>, overrides: DebugOverrides) -> Self {
        let state = GameState::new(&config);
        Self::from_state(state, config, rng, overrides)
    }

    /// Fresh session with the bundled configuration and a seeded stream.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(
            GameConfig::load_from_static(),
            Box::new(SeededRng::from_user_seed(seed)),
            DebugOverrides::none(),
        )
    }

    /// Resume from an arbitrary position. No guard runs; a report phase gets
    /// its timer re-armed, a battle waits for its next step to be driven.
    #[must_use]
    pub fn from_state(
        state: GameState,
        config: GameConfig,
        rng: Box<dyn GameRng>,
        overrides: DebugOverrides,
    ) -> Self {
        let mut game = Self {
            state,
            config,
            rng,
            overrides,
            scheduler: Scheduler::default(),
            deferred: VecDeque::new(),
        };
        game.arm_report_timer();
        game
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn overrides(&self) -> &DebugOverrides {
        &self.overrides
    }

    /// Virtual milliseconds since the session was created.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    #[must_use]
    pub fn next_timer_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    #[must_use]
    pub fn pending_battle_step(&self) -> Option<BattleStep> {
        self.scheduler.battle_timer().map(|timer| timer.payload)
    }

    #[must_use]
    pub const fn is_session_over(&self) -> bool {
        self.state.session_over
    }

    /// Move the virtual clock forward by `ms`, firing every timer that
    /// comes due on the way, in due order.
    pub fn advance(&mut self, ms: u64) {
        let deadline = self.scheduler.now_ms().saturating_add(ms);
        while let Some(fired) = self.scheduler.pop_due(Some(deadline)) {
            self.fire(fired);
            self.drain_deferred();
        }
        self.scheduler.advance_to(deadline);
    }

    /// Jump straight to the next pending timer and fire it. Returns `false`
    /// when nothing is scheduled.
    pub fn fire_next_timer(&mut self) -> bool {
        let Some(fired) = self.scheduler.pop_due(None) else {
            return false;
        };
        self.fire(fired);
        self.drain_deferred();
        true
    }

    fn fire(&mut self, fired: Fired<BattleStep>) {
        match fired {
            Fired::Report(id) => {
                debug!("report timer {id:?} fired in {}", self.state.phase);
                self.dispatch(Event::Timer);
            }
            Fired::Battle(id, step) => {
                debug!("battle timer {id:?} fired: {step:?}");
                self.run_battle_step(step);
            }
        }
    }

    fn defer(&mut self, event: Event) {
        self.deferred.push_back(event);
    }

    fn drain_deferred(&mut self) {
        while let Some(event) = self.deferred.pop_front() {
            self.dispatch(event);
        }
    }

    fn arm_report_timer(&mut self) {
        self.scheduler.cancel_report();
        if let Some(length) = self.state.phase.report_length() {
            self.scheduler
                .schedule_report(self.config.reports.duration(length));
        }
    }

    /// Regular probability check, overridden by `forced` when armed. The draw
    /// always happens and the override is spent either way.
    fn chance_or_forced(
        &mut self,
        numerator: i64,
        denominator: i64,
        forced: ForcedOutcome,
    ) -> bool {
        let drawn = self.rng.weighted_bool(numerator, denominator);
        let forced = self.overrides.take(forced);
        drawn || forced
    }

    fn note(&mut self, key: &str) {
        debug!("log {key}");
        self.state.logs.push(key.to_string());
    }
}
