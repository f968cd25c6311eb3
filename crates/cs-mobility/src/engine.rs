//! Mobility engine: seeds the population and advances it step by step.

use cs_core::{UserId, UserRng};
use rand_distr::Normal;
use tracing::debug;

use crate::{MobilityError, MobilityParams, MobilityResult, MobilityStore, MovementState, PositionSeries};

/// Drives the Gauss–Markov model for a fixed population.
///
/// Each user owns an independent [`UserRng`] derived from the engine seed, so
/// a user's trajectory depends only on the seed, its `UserId` and the
/// parameters, never on how many other users are simulated.
pub struct MobilityEngine {
    /// Model parameters (validated at construction).
    pub params: MobilityParams,

    /// Live per-user movement state.
    pub store: MobilityStore,

    /// Per-user RNG streams, kept apart from `store` so both can be borrowed
    /// at once during the update loop.
    rngs: Vec<UserRng>,

    speed_noise:   Normal<f64>,
    heading_noise: Normal<f64>,
}

impl MobilityEngine {
    /// Create `user_count` users with random starting states.
    pub fn new(params: MobilityParams, user_count: usize, seed: u64) -> MobilityResult<Self> {
        params.validate()?;

        let speed_noise = Normal::new(0.0, params.speed_noise_std)
            .map_err(|e| MobilityError::Distribution(e.to_string()))?;
        let heading_noise = Normal::new(0.0, params.heading_noise_std)
            .map_err(|e| MobilityError::Distribution(e.to_string()))?;

        let mut rngs: Vec<UserRng> = (0..user_count as u32)
            .map(|i| UserRng::new(seed, UserId(i)))
            .collect();
        let states = rngs
            .iter_mut()
            .map(|rng| MovementState::random(&params, rng))
            .collect();

        debug!(users = user_count, seed, "mobility engine initialised");

        Ok(Self {
            params,
            store: MobilityStore::new(states),
            rngs,
            speed_noise,
            heading_noise,
        })
    }

    /// Overwrite the state of `user` (e.g. to start from a known position).
    pub fn place(&mut self, user: UserId, state: MovementState) -> MobilityResult<()> {
        let slot = self
            .store
            .states
            .get_mut(user.index())
            .ok_or(MobilityError::UnknownUser(user))?;
        *slot = state;
        Ok(())
    }

    /// Advance every user by one step.
    pub fn step(&mut self) {
        // Split borrow: states and rngs are separate fields.
        let params = &self.params;
        for (state, rng) in self.store.states.iter_mut().zip(self.rngs.iter_mut()) {
            state.advance(params, &self.speed_noise, &self.heading_noise, rng);
        }
    }

    /// Run `steps` updates, recording every user's position after each one.
    pub fn generate(&mut self, steps: usize) -> PositionSeries {
        let mut series = PositionSeries::with_capacity(steps, self.store.len());
        for _ in 0..steps {
            self.step();
            series.record(&self.store);
        }
        debug!(steps, users = self.store.len(), "position series generated");
        series
    }
}
