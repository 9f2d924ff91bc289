//! Numeric conversion helpers centralizing the float/integer crossings.
//!
//! Several encounter formulas scale an integer amount by a real factor and
//! then truncate. Every such crossing goes through this module so the
//! truncation rule (toward zero, clamped at zero, NaN as zero) lives in one place.

use num_traits::cast::cast;

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Truncate a f64 toward zero and clamp it to the u64 range.
///
/// Negative values and NaN become 0; values past `u64::MAX` saturate.
#[must_use]
pub fn floor_f64_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = u64_to_f64(u64::MAX);
    if value >= max {
        return u64::MAX;
    }
    cast::<f64, u64>(value.trunc()).unwrap_or(0)
}

/// Convert a non-negative amount into the signed domain used by the RNG.
#[must_use]
pub fn u64_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a signed draw back into an amount, clamping negatives to zero.
#[must_use]
pub fn i64_to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
