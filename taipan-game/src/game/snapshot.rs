//! One serializable value holding everything a session publishes.
use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

use super::{BattleStep, Game};
use crate::state::GameState;

/// Pending timers, as due times on the virtual clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub now_ms: u64,
    pub report_due_ms: Option<u64>,
    pub battle_due_ms: Option<u64>,
    pub battle_step: Option<BattleStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub timers: TimerSnapshot,
}

impl GameSnapshot {
    /// XxHash64 of the snapshot's JSON encoding.
    #[must_use]
    pub fn digest(&self) -> u64 {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(&bytes);
        hasher.finish()
    }
}

impl Game {
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let battle = self.scheduler.battle_timer();
        GameSnapshot {
            state: self.state.clone(),
            timers: TimerSnapshot {
                now_ms: self.scheduler.now_ms(),
                report_due_ms: self.scheduler.report_timer().map(|timer| timer.due_ms),
                battle_due_ms: battle.map(|timer| timer.due_ms),
                battle_step: battle.map(|timer| timer.payload),
            },
        }
    }

    /// Digest of [`Self::snapshot`]; equal digests mean identical published state.
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.snapshot().digest()
    }
}
