//! Tunable durations and start presets.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::UnknownKey;
use crate::error::ConfigError;
use crate::phase::ReportLength;

const DEFAULT_GAME_CONFIG: &str = include_str!("../data/game_config.json");

/// The two ways to begin a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOption {
    /// Cash and a loan from Elder Brother Wu.
    Debt,
    /// Five guns and no money.
    Guns,
}

impl StartOption {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Debt => "debt",
            Self::Guns => "guns",
        }
    }
}

impl fmt::Display for StartOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StartOption {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debt" => Ok(Self::Debt),
            "guns" => Ok(Self::Guns),
            _ => Err(UnknownKey {
                kind: "start option",
                value: s.to_string(),
            }),
        }
    }
}

/// Opening position applied by the `debt` / `guns` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPreset {
    pub cash: u64,
    pub debt: u64,
    pub guns: u64,
    pub li_yuen_counter: u8,
    /// Denominator of the per-voyage pirate check.
    pub pirate_odds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartPresets {
    pub debt: StartPreset,
    pub guns: StartPreset,
}

impl StartPresets {
    #[must_use]
    pub const fn preset(&self, option: StartOption) -> &StartPreset {
        match option {
            StartOption::Debt => &self.debt,
            StartOption::Guns => &self.guns,
        }
    }
}

impl Default for StartPresets {
    fn default() -> Self {
        Self {
            debt: StartPreset {
                cash: 400,
                debt: 5000,
                guns: 0,
                li_yuen_counter: 0,
                pirate_odds: 10,
            },
            guns: StartPreset {
                cash: 0,
                debt: 0,
                guns: 5,
                li_yuen_counter: 1,
                pirate_odds: 7,
            },
        }
    }
}

/// Report timers, in virtual milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTimers {
    pub short_ms: u64,
    pub long_ms: u64,
}

impl ReportTimers {
    #[must_use]
    pub const fn duration(&self, length: ReportLength) -> u64 {
        match length {
            ReportLength::Short => self.short_ms,
            ReportLength::Long => self.long_ms,
        }
    }
}

impl Default for ReportTimers {
    fn default() -> Self {
        Self {
            short_ms: 3000,
            long_ms: 5000,
        }
    }
}

/// Delays between the steps of a sea battle, in virtual milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleTimings {
    /// Pause around orders, messages and enemy fire.
    pub step_ms: u64,
    /// Time to aim one gun.
    pub aim_ms: u64,
    /// Gap between shots of the same volley.
    pub reload_ms: u64,
}

impl Default for BattleTimings {
    fn default() -> Self {
        Self {
            step_ms: 3000,
            aim_ms: 1000,
            reload_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub reports: ReportTimers,
    pub battle: BattleTimings,
    pub starts: StartPresets,
    pub initial_capacity: u64,
    pub warehouse_capacity: u64,
    pub retirement_threshold: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reports: ReportTimers::default(),
            battle: BattleTimings::default(),
            starts: StartPresets::default(),
            initial_capacity: 60,
            warehouse_capacity: 10_000,
            retirement_threshold: 1_000_000,
        }
    }
}

impl GameConfig {
    /// Bundled configuration; falls back to the built-in defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_GAME_CONFIG).unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value would stall the session.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::Invalid("initial_capacity must be positive".into()));
        }
        for (name, preset) in [("debt", &self.starts.debt), ("guns", &self.starts.guns)] {
            if preset.pirate_odds <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "starts.{name}.pirate_odds must be positive"
                )));
            }
        }
        Ok(())
    }
}
