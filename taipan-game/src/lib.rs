//! Taipan Game Engine
//!
//! Platform-agnostic simulation core for a historical trading and naval
//! combat game: the port economy, the voyage encounter cascade and the sea
//! battle sub-simulation, driven as one deterministic state machine.
//! Presentation layers talk to it only through events, player actions and
//! read access to the published state.

pub mod cargo;
pub mod catalog;
pub mod clock;
pub mod combat;
pub mod config;
mod constants;
pub mod encounters;
pub mod error;
pub mod game;
pub mod ledger;
pub mod market;
pub mod numbers;
pub mod overrides;
pub mod phase;
pub mod rng;
pub mod scheduler;
pub mod seed;
pub mod ship;
pub mod state;

// Re-export commonly used types
pub use cargo::Inventory;
pub use catalog::{City, Merchandise, Month, UnknownKey};
pub use clock::Clock;
pub use combat::{Animation, Battle, BattleMessage, BattleOrder, HostileType};
pub use config::{BattleTimings, GameConfig, ReportTimers, StartOption, StartPreset, StartPresets};
pub use error::{ConfigError, Rejection};
pub use game::{BattleStep, Game, GameSnapshot, TimerSnapshot};
pub use ledger::Ledger;
pub use market::{PriceShock, PriceTable};
pub use overrides::{DebugOverrides, ForcedOutcome};
pub use phase::{Event, Phase, ReportLength};
pub use rng::{GameRng, ScriptedRng, SeededRng};
pub use scheduler::TimerId;
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use ship::{Ship, ShipCondition};
pub use state::{GameState, VoyageReports};
