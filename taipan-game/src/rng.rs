//! Random draw policy shared by the market, the encounter cascade and combat.
//!
//! Every probability check in the simulation is a [`GameRng::weighted_bool`]
//! call and every random pick is a [`GameRng::uniform_int`] call, so a
//! scripted source can select exact branches in tests.
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::Sha256;
use std::collections::VecDeque;
use std::fmt;

/// Source of uniform draws used by the simulation.
pub trait GameRng: fmt::Debug {
    /// Uniform integer in `low..=high`. Implementations return `low` when the
    /// range is empty.
    fn uniform_int(&mut self, low: i64, high: i64) -> i64;

    /// Uniform real in `low..=high`. Implementations return `low` when the
    /// range is empty.
    fn uniform_real(&mut self, low: f64, high: f64) -> f64;

    /// `numerator / denominator` chance of `true`: draw in `0..denominator`
    /// and compare against the numerator.
    fn weighted_bool(&mut self, numerator: i64, denominator: i64) -> bool {
        if denominator <= 0 {
            return false;
        }
        self.uniform_int(0, denominator - 1) < numerator
    }

    /// Uniformly pick an index in `0..len`, or `None` for an empty collection.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let high = i64::try_from(len - 1).unwrap_or(i64::MAX);
        usize::try_from(self.uniform_int(0, high)).ok()
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub(crate) struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl<R: RngCore> CountingRng<R> {
    pub(crate) const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub(crate) const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Production source: a seeded, draw-counting generator.
#[derive(Debug, Clone)]
pub struct SeededRng<R = SmallRng> {
    inner: CountingRng<R>,
}

impl SeededRng<SmallRng> {
    /// Construct the session stream from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let stream_seed = derive_stream_seed(seed, b"taipan.session");
        Self::from_rng(SmallRng::seed_from_u64(stream_seed))
    }
}

impl<R: RngCore> SeededRng<R> {
    /// Wrap an arbitrary generator.
    pub const fn from_rng(rng: R) -> Self {
        Self {
            inner: CountingRng::new(rng),
        }
    }

    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.inner.draws()
    }
}

impl<R: RngCore + fmt::Debug> GameRng for SeededRng<R> {
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        if high.partial_cmp(&low) != Some(std::cmp::Ordering::Greater) {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Deterministic test double replaying scripted draws.
///
/// Integer draws are offsets from the requested lower bound, clamped into
/// the range, so `0` always yields `low`. Real draws are fractions of the
/// range in `0.0..=1.0`. When a queue runs dry the fallback value is used.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    ints: VecDeque<i64>,
    reals: VecDeque<f64>,
    int_fallback: i64,
    real_fallback: f64,
    draws: u64,
}

impl ScriptedRng {
    /// Every integer draw lands `offset` above the lower bound; every real
    /// draw returns the lower bound.
    #[must_use]
    pub fn constant(offset: i64) -> Self {
        Self {
            int_fallback: offset,
            ..Self::default()
        }
    }

    /// Replay `ints` in order, then fall back to offset 0.
    #[must_use]
    pub fn with_ints(ints: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn then_reals(mut self, reals: impl IntoIterator<Item = f64>) -> Self {
        self.reals.extend(reals);
        self
    }

    #[must_use]
    pub const fn int_fallback(mut self, offset: i64) -> Self {
        self.int_fallback = offset;
        self
    }

    #[must_use]
    pub const fn real_fallback(mut self, fraction: f64) -> Self {
        self.real_fallback = fraction;
        self
    }

    pub fn push_ints(&mut self, ints: impl IntoIterator<Item = i64>) {
        self.ints.extend(ints);
    }

    pub fn push_reals(&mut self, reals: impl IntoIterator<Item = f64>) {
        self.reals.extend(reals);
    }

    /// Scripted integer draws not yet consumed.
    #[must_use]
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }

    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl GameRng for ScriptedRng {
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        self.draws = self.draws.saturating_add(1);
        let offset = self.ints.pop_front().unwrap_or(self.int_fallback).max(0);
        if high <= low {
            return low;
        }
        low.saturating_add(offset).min(high)
    }

    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        self.draws = self.draws.saturating_add(1);
        let fraction = self
            .reals
            .pop_front()
            .unwrap_or(self.real_fallback)
            .clamp(0.0, 1.0);
        if high.partial_cmp(&low) != Some(std::cmp::Ordering::Greater) {
            return low;
        }
        low + (high - low) * fraction
    }
}
