//! Payload formulas for the arrival and voyage encounters.
//!
//! Each function performs exactly the draws of its encounter, in order, so a
//! scripted source lines up with the cascade. Integer truncation happens at
//! the same points as the game's arithmetic: divisions inside a draw range
//! are integer divisions, real-valued scalings are truncated at the end.
use crate::catalog::City;
use crate::constants::{
    EARLY_GAME_MONTHS, LI_YUEN_COUNTER_WRAP, LI_YUEN_JUST_PAID, LI_YUEN_WANTS_MONEY,
};
use crate::numbers::{floor_f64_to_u64, i64_to_u64, u64_to_f64, u64_to_i64};
use crate::rng::GameRng;

fn draw_up_to(rng: &mut dyn GameRng, high: u64) -> u64 {
    i64_to_u64(rng.uniform_int(0, u64_to_i64(high)))
}

fn draw_between(rng: &mut dyn GameRng, low: u64, high: u64) -> u64 {
    i64_to_u64(rng.uniform_int(u64_to_i64(low), u64_to_i64(high)))
}

/// Li Yuen's temple donation.
///
/// Early on the demand is `50 + U(0, cash/1.8)`; the floor of 50 keeps a
/// penniless draw from asking nothing. Later it scales with months elapsed.
pub fn li_yuen_demand(months: u64, cash: u64, rng: &mut dyn GameRng) -> u64 {
    if months <= EARLY_GAME_MONTHS {
        let ceiling = floor_f64_to_u64(u64_to_f64(cash) / 1.8);
        50 + draw_up_to(rng, ceiling)
    } else {
        let base = draw_between(rng, months.saturating_mul(1000), months.saturating_mul(2000));
        let ceiling = floor_f64_to_u64(u64_to_f64(cash) / 1.4);
        base.saturating_add(draw_up_to(rng, ceiling))
    }
}

/// McHenry's per-unit repair rate. Never below 1.
pub fn mchenry_rate(months: u64, capacity: u64, rng: &mut dyn GameRng) -> u64 {
    let variable = u64_to_f64(60 * (months + 3) / 4);
    let fixed = u64_to_f64(25 * (months + 3) / 4 * capacity / 50);
    floor_f64_to_u64(variable * rng.uniform_real(0.0, 1.0) + fixed).max(1)
}

/// Price to repair the whole hull.
#[must_use]
pub const fn mchenry_offer(rate: u64, damage: u64) -> u64 {
    rate.saturating_mul(damage).saturating_add(1)
}

/// Elder Brother Wu's charity: `(offer, repay)`. Later bailouts cost more.
pub fn bailout_terms(attempts: u64, rng: &mut dyn GameRng) -> (u64, u64) {
    let offer = draw_between(rng, 500, 1999);
    let repay = 1500 + draw_up_to(rng, attempts.saturating_mul(2000));
    (offer, repay)
}

pub fn bodyguards_lost(rng: &mut dyn GameRng) -> u64 {
    draw_between(rng, 1, 3)
}

/// Price of a bigger hull, scaled by the current one.
pub fn ship_offer(months: u64, capacity: u64, rng: &mut dyn GameRng) -> u64 {
    let spread = 1000 * (months + 5) / 6;
    1000 + draw_up_to(rng, spread) * (capacity / 50)
}

pub fn gun_offer(months: u64, rng: &mut dyn GameRng) -> u64 {
    let spread = 1000 * (months + 5) / 6;
    500 + draw_up_to(rng, spread)
}

/// Customs fine for opium; at least 1 so the seizure always costs something.
pub fn opium_fine(cash: u64, rng: &mut dyn GameRng) -> u64 {
    floor_f64_to_u64(u64_to_f64(cash) / 1.8 * rng.uniform_real(0.0, 1.0) + 1.0)
}

/// Units left in a warehouse bin after thieves visit.
pub fn theft_remaining(quantity: u64, rng: &mut dyn GameRng) -> u64 {
    floor_f64_to_u64(u64_to_f64(quantity) / 1.8 * rng.uniform_real(0.0, 1.0))
}

/// Street robbery; the 0.1 floor on the factor keeps it from taking nothing.
pub fn robbery_loss(cash: u64, rng: &mut dyn GameRng) -> u64 {
    floor_f64_to_u64(u64_to_f64(cash) / 1.4 * rng.uniform_real(0.1, 1.0))
}

/// Li Yuen's counter may tick forward each arrival, wrapping back to
/// "wants money" once it reaches 4.
pub fn advance_li_yuen_counter(counter: u8, rng: &mut dyn GameRng) -> u8 {
    let mut next = counter;
    if rng.weighted_bool(1, 20) {
        if next >= LI_YUEN_JUST_PAID {
            next = next.saturating_add(1);
        }
        if next == LI_YUEN_COUNTER_WRAP {
            next = LI_YUEN_WANTS_MONEY;
        }
    }
    next
}

/// Whether Li Yuen's fleet shows up once generic pirates did not.
/// Paying him recently makes an approach less likely.
pub fn li_yuen_approaches(counter: u8, rng: &mut dyn GameRng) -> bool {
    rng.weighted_bool(1, 4 + 8 * i64::from(counter))
}

/// The storm takes the ship only when the hull is fully damaged and the
/// draw in `0..=3` exceeds 1.
pub fn storm_sinks(damage: u64, capacity: u64, rng: &mut dyn GameRng) -> bool {
    let exposure = if capacity == 0 { 0 } else { damage / capacity * 3 };
    rng.uniform_real(0.0, u64_to_f64(exposure)) > 1.0
}

/// A new random port other than the current destination.
pub fn blown_off_course(destination: Option<City>, rng: &mut dyn GameRng) -> Option<City> {
    let candidates: Vec<City> = City::ALL
        .into_iter()
        .filter(|city| Some(*city) != destination)
        .collect();
    rng.pick_index(candidates.len()).map(|i| candidates[i])
}
