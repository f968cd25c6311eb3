//! Deterministic per-user and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each user gets its own independent `SmallRng` seeded by:
//!
//!   seed = stage_seed XOR (user_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive user IDs uniformly across the seed space.
//! This means:
//!
//! - Users never share RNG state, so per-user work can run on any thread
//!   and still draw the same numbers.
//! - Adding users at the end of the population does not disturb the streams
//!   of existing users.
//!
//! Different pipeline stages (mobility, shadowing) use different stage seeds,
//! usually derived from one root [`SimRng`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::UserId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── UserRng ───────────────────────────────────────────────────────────────────

/// Per-user deterministic RNG.
pub struct UserRng(SmallRng);

impl UserRng {
    /// Seed deterministically from a stage seed and a user ID.
    pub fn new(stage_seed: u64, user: UserId) -> Self {
        let seed = stage_seed ^ (user.0 as u64).wrapping_mul(MIXING_CONSTANT);
        UserRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` / `rand_distr`
    /// distribution types (`dist.sample(rng.inner())`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG, used single-threaded to derive stage seeds.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw a fresh 64-bit seed for a pipeline stage.
    #[inline]
    pub fn stage_seed(&mut self) -> u64 {
        self.0.r#gen()
    }
}
