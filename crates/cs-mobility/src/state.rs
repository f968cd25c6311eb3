//! Per-user movement state.

use std::f64::consts::PI;

use cs_core::{Point, UserRng};
use rand_distr::{Distribution, Normal};

use crate::MobilityParams;

/// Position, speed and heading of a single user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    /// Current position in the service area, metres.
    pub position: Point,

    /// Current speed, m/s.  Never negative.
    pub speed_mps: f64,

    /// Current heading, radians (0 = +x, π/2 = +y).  Not normalised.
    pub heading_rad: f64,
}

impl MovementState {
    #[inline]
    pub fn new(position: Point, speed_mps: f64, heading_rad: f64) -> Self {
        Self { position, speed_mps, heading_rad }
    }

    /// Draw a starting state: uniform position in the area, uniform speed in
    /// the configured initial range, uniform heading.
    pub fn random(params: &MobilityParams, rng: &mut UserRng) -> Self {
        let size = params.area_size_m;
        let position = Point::new(rng.gen_range(0.0..=size), rng.gen_range(0.0..=size));
        let speed = rng.gen_range(params.initial_speed_min_mps..params.initial_speed_max_mps);
        let heading = rng.gen_range(0.0..2.0 * PI);
        Self::new(position, speed, heading)
    }

    /// Apply one Gauss–Markov update and move the user.
    ///
    /// When the new position leaves the area the heading is mirrored on the
    /// offending axis and the position is clamped onto the boundary; the
    /// mirrored heading takes effect from the next step.
    pub fn advance(
        &mut self,
        params:        &MobilityParams,
        speed_noise:   &Normal<f64>,
        heading_noise: &Normal<f64>,
        rng:           &mut UserRng,
    ) {
        let a = params.alpha;
        let k = params.innovation_scale();

        let ds = speed_noise.sample(rng.inner());
        self.speed_mps = (a * self.speed_mps + (1.0 - a) * params.mean_speed_mps + k * ds).max(0.0);

        let dh = heading_noise.sample(rng.inner());
        self.heading_rad = a * self.heading_rad + (1.0 - a) * params.mean_heading_rad + k * dh;

        let dt = params.step_duration_secs;
        self.position.x += self.speed_mps * self.heading_rad.cos() * dt;
        self.position.y += self.speed_mps * self.heading_rad.sin() * dt;

        let area = params.area();
        if !area.contains_coord(self.position.x) {
            self.heading_rad = PI - self.heading_rad;
        }
        if !area.contains_coord(self.position.y) {
            self.heading_rad = -self.heading_rad;
        }
        self.position = area.clamp(self.position);
    }
}
