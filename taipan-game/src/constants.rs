//! Fixed rules of the trade and combat simulation.
//!
//! Durations and start presets are tunable through [`crate::GameConfig`];
//! everything here is part of the game's arithmetic and stays in code.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_DEPARTED: &str = "log.travel.departed";
pub(crate) const LOG_ARRIVED: &str = "log.travel.arrived";
pub(crate) const LOG_BLOWN_OFF_COURSE: &str = "log.travel.blown-off-course";
pub(crate) const LOG_LI_YUEN_DEMAND: &str = "log.li-yuen.demand";
pub(crate) const LOG_LI_YUEN_PAID: &str = "log.li-yuen.paid";
pub(crate) const LOG_LI_YUEN_BORROWED: &str = "log.li-yuen.borrowed";
pub(crate) const LOG_LI_YUEN_MESSAGE: &str = "log.li-yuen.message";
pub(crate) const LOG_MCHENRY_OFFER: &str = "log.mchenry.offer";
pub(crate) const LOG_MCHENRY_REPAIR: &str = "log.mchenry.repair";
pub(crate) const LOG_WU_WARNING: &str = "log.wu.warning";
pub(crate) const LOG_WU_BAILOUT: &str = "log.wu.bailout";
pub(crate) const LOG_WU_BANKRUPTCY: &str = "log.wu.bankruptcy";
pub(crate) const LOG_CUTTHROATS: &str = "log.wu.cutthroats";
pub(crate) const LOG_SHIP_OFFER: &str = "log.offer.ship";
pub(crate) const LOG_GUN_OFFER: &str = "log.offer.gun";
pub(crate) const LOG_SHIP_UPGRADED: &str = "log.offer.ship-upgraded";
pub(crate) const LOG_GUN_BOUGHT: &str = "log.offer.gun-bought";
pub(crate) const LOG_OPIUM_SEIZED: &str = "log.opium-seized";
pub(crate) const LOG_WAREHOUSE_THEFT: &str = "log.warehouse-theft";
pub(crate) const LOG_PRICE_DROP: &str = "log.market.price-drop";
pub(crate) const LOG_PRICE_JUMP: &str = "log.market.price-jump";
pub(crate) const LOG_ROBBERY: &str = "log.robbery";
pub(crate) const LOG_HOSTILES: &str = "log.battle.hostiles";
pub(crate) const LOG_LI_YUEN_FLEET: &str = "log.battle.li-yuen-fleet";
pub(crate) const LOG_BOOTY: &str = "log.battle.booty";
pub(crate) const LOG_SHIP_LOST: &str = "log.battle.ship-lost";
pub(crate) const LOG_RAN_AWAY: &str = "log.battle.ran-away";
pub(crate) const LOG_GOT_AWAY: &str = "log.battle.got-away";
pub(crate) const LOG_SHOOK_OFF: &str = "log.battle.shook-off";
pub(crate) const LOG_STORM: &str = "log.storm";
pub(crate) const LOG_STORM_SANK: &str = "log.storm.sank";
pub(crate) const LOG_RETIRED: &str = "log.retired";

// Economy ------------------------------------------------------------------
pub(crate) const GUN_WEIGHT: u64 = 10;
pub(crate) const MAX_GUNS: u64 = 1000;
pub(crate) const SHIP_UPGRADE_CAPACITY: u64 = 50;
pub(crate) const START_YEAR: u32 = 1860;
pub(crate) const INTEREST_DEBT: f64 = 1.1;
pub(crate) const INTEREST_BANK: f64 = 1.005;
pub(crate) const LOAN_MULTIPLIER: u64 = 2;

// Encounter thresholds -----------------------------------------------------
pub(crate) const WU_WARNING_DEBT: u64 = 10_000;
pub(crate) const CUTTHROATS_DEBT: u64 = 20_000;
pub(crate) const ROBBERY_CASH: u64 = 25_000;
pub(crate) const EARLY_GAME_MONTHS: u64 = 12;
pub(crate) const LI_YUEN_WANTS_MONEY: u8 = 0;
pub(crate) const LI_YUEN_JUST_PAID: u8 = 1;
pub(crate) const LI_YUEN_COUNTER_WRAP: u8 = 4;

// Combat -------------------------------------------------------------------
pub(crate) const HOSTILE_SLOTS: usize = 9;
pub(crate) const MAX_GENERIC_HOSTILES: u64 = 9999;
pub(crate) const SHOT_DAMAGE_MIN: i64 = 10;
pub(crate) const SHOT_DAMAGE_MAX: i64 = 40;
pub(crate) const HOSTILE_HEALTH_BASE: i64 = 20;
pub(crate) const FLEE_FACTOR: f64 = 0.6;
pub(crate) const FIGHT_ESCAPE_CHANCE: u64 = 3;
pub(crate) const GUN_HIT_DAMAGE_PERCENT: u64 = 80;
pub(crate) const HIT_HOSTILE_CAP: u64 = 15;
pub(crate) const IN_DANGER_STATUS: u64 = 40;
