//! Gauss–Markov tuning parameters.

use std::f64::consts::PI;

use cs_core::Area;

use crate::{MobilityError, MobilityResult};

/// Parameters of the Gauss–Markov mobility model.
///
/// Defaults describe pedestrians in a 1 km × 1 km urban block with one-second
/// steps and a westward drift.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MobilityParams {
    /// Side length of the square service area, metres.
    pub area_size_m: f64,

    /// Integration interval, seconds.  Should equal the controller's step
    /// duration.
    pub step_duration_secs: f64,

    /// Memory level in `[0, 1]`.
    pub alpha: f64,

    /// Long-run mean speed, m/s.
    pub mean_speed_mps: f64,

    /// Long-run mean heading, radians.
    pub mean_heading_rad: f64,

    /// Standard deviation of the speed innovation.
    pub speed_noise_std: f64,

    /// Standard deviation of the heading innovation, radians.
    pub heading_noise_std: f64,

    /// Initial speeds are drawn uniformly from `[min, max)`.
    pub initial_speed_min_mps: f64,
    pub initial_speed_max_mps: f64,
}

impl Default for MobilityParams {
    fn default() -> Self {
        Self {
            area_size_m:           1_000.0,
            step_duration_secs:    1.0,
            alpha:                 0.85,
            mean_speed_mps:        1.5,
            mean_heading_rad:      PI,
            speed_noise_std:       1.0,
            heading_noise_std:     0.2,
            initial_speed_min_mps: 1.0,
            initial_speed_max_mps: 5.0,
        }
    }
}

impl MobilityParams {
    #[inline]
    pub fn area(&self) -> Area {
        Area::new(self.area_size_m)
    }

    /// Scale applied to both innovations, `√(1-α²)`.
    #[inline]
    pub fn innovation_scale(&self) -> f64 {
        (1.0 - self.alpha * self.alpha).sqrt()
    }

    pub fn validate(&self) -> MobilityResult<()> {
        fn invalid(name: &'static str, reason: impl Into<String>) -> MobilityError {
            MobilityError::InvalidParam { name, reason: reason.into() }
        }

        if !(self.area_size_m.is_finite() && self.area_size_m > 0.0) {
            return Err(invalid("area_size_m", format!("must be positive, got {}", self.area_size_m)));
        }
        if !(self.step_duration_secs.is_finite() && self.step_duration_secs > 0.0) {
            return Err(invalid(
                "step_duration_secs",
                format!("must be positive, got {}", self.step_duration_secs),
            ));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(invalid("alpha", format!("must lie in [0, 1], got {}", self.alpha)));
        }
        for (name, v) in [
            ("speed_noise_std", self.speed_noise_std),
            ("heading_noise_std", self.heading_noise_std),
            ("initial_speed_min_mps", self.initial_speed_min_mps),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(invalid(name, format!("must be finite and non-negative, got {v}")));
            }
        }
        if !(self.mean_speed_mps.is_finite() && self.mean_heading_rad.is_finite()) {
            return Err(invalid("mean_speed_mps / mean_heading_rad", "must be finite"));
        }
        if !(self.initial_speed_max_mps.is_finite()
            && self.initial_speed_max_mps > self.initial_speed_min_mps)
        {
            return Err(invalid(
                "initial_speed_max_mps",
                format!(
                    "must exceed initial_speed_min_mps ({} <= {})",
                    self.initial_speed_max_mps, self.initial_speed_min_mps
                ),
            ));
        }
        Ok(())
    }
}
