pub mod autopilot;
pub mod reports;
pub mod seeds;

pub use autopilot::{Autopilot, CampaignRecord};
pub use seeds::{SeedInfo, resolve_seed_inputs, split_csv};
