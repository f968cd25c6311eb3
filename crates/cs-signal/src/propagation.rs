//! Log-distance path loss with log-normal shadowing.
//!
//! ```text
//! PL(d)  = L0 + 10·n·log10(max(d, d_min) / d0)
//! RSSI   = P_tx − PL(d) + X,   X ~ N(0, σ)
//! ```
//!
//! Shadowing is drawn independently for every (step, user, tower) triple.
//! Each user draws from its own [`UserRng`] in step-then-tower order, so the
//! tensor depends only on the seed and never on thread scheduling.

use cs_core::{Step, TowerId, UserId, UserRng};
use cs_mobility::PositionSeries;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::{RssiSeries, SignalError, SignalResult, TowerLayout};

/// Parameters of the log-distance propagation law.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathLossModel {
    /// Transmit power, dBm.
    pub tx_power_dbm: f64,
    /// Path-loss exponent `n` (≈3.5 in dense urban areas).
    pub exponent: f64,
    /// Reference distance `d0`, metres.
    pub ref_distance_m: f64,
    /// Path loss at the reference distance `L0`, dB.
    pub ref_loss_db: f64,
    /// Shadowing standard deviation `σ`, dB.  Zero disables shadowing.
    pub shadowing_sigma_db: f64,
    /// Distances below this are treated as this (avoids `log10(0)`).
    pub min_distance_m: f64,
}

impl Default for PathLossModel {
    fn default() -> Self {
        Self {
            tx_power_dbm:       30.0,
            exponent:           3.5,
            ref_distance_m:     1.0,
            ref_loss_db:        40.0,
            shadowing_sigma_db: 6.0,
            min_distance_m:     0.1,
        }
    }
}

impl PathLossModel {
    pub fn validate(&self) -> SignalResult<()> {
        fn invalid(name: &'static str, v: f64, rule: &str) -> SignalError {
            SignalError::InvalidModel { name, reason: format!("{rule}, got {v}") }
        }
        for (name, v) in [
            ("tx_power_dbm", self.tx_power_dbm),
            ("exponent", self.exponent),
            ("ref_loss_db", self.ref_loss_db),
        ] {
            if !v.is_finite() {
                return Err(invalid(name, v, "must be finite"));
            }
        }
        for (name, v) in [
            ("ref_distance_m", self.ref_distance_m),
            ("min_distance_m", self.min_distance_m),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(name, v, "must be positive"));
            }
        }
        if !(self.shadowing_sigma_db.is_finite() && self.shadowing_sigma_db >= 0.0) {
            return Err(invalid("shadowing_sigma_db", self.shadowing_sigma_db, "must be non-negative"));
        }
        Ok(())
    }

    /// Deterministic path loss at `distance_m`, dB.
    #[inline]
    pub fn path_loss_db(&self, distance_m: f64) -> f64 {
        let d = distance_m.max(self.min_distance_m);
        self.ref_loss_db + 10.0 * self.exponent * (d / self.ref_distance_m).log10()
    }

    /// Received power without shadowing, dBm.
    #[inline]
    pub fn mean_rssi_dbm(&self, distance_m: f64) -> f64 {
        self.tx_power_dbm - self.path_loss_db(distance_m)
    }
}

/// Compute the full `[step][user][tower]` RSSI tensor for a position series.
///
/// With the `parallel` feature the per-user columns are computed on Rayon's
/// pool; the output is bit-identical to the sequential path.
pub fn compute_rssi(
    positions: &PositionSeries,
    layout:    &TowerLayout,
    model:     &PathLossModel,
    seed:      u64,
) -> SignalResult<RssiSeries> {
    model.validate()?;
    if layout.is_empty() {
        return Err(SignalError::NoTowers);
    }
    let shadowing = Normal::new(0.0, model.shadowing_sigma_db)
        .map_err(|e| SignalError::InvalidModel { name: "shadowing_sigma_db", reason: e.to_string() })?;

    let steps  = positions.step_count();
    let users  = positions.user_count();
    let towers = layout.len();
    let flat   = positions.as_slice();

    // One user's samples, step-major then tower.
    let column = |user: usize| -> Vec<f64> {
        let mut rng = UserRng::new(seed, UserId(user as u32));
        let mut out = Vec::with_capacity(steps * towers);
        for step in 0..steps {
            let p = flat[step * users + user];
            for tower in layout.iter() {
                let shadow = shadowing.sample(rng.inner());
                out.push(model.mean_rssi_dbm(p.distance_m(tower.position)) + shadow);
            }
        }
        out
    };

    #[cfg(not(feature = "parallel"))]
    let columns: Vec<Vec<f64>> = (0..users).map(column).collect();

    #[cfg(feature = "parallel")]
    let columns: Vec<Vec<f64>> = {
        use rayon::prelude::*;
        (0..users).into_par_iter().map(column).collect()
    };

    let mut values = vec![0.0; steps * users * towers];
    for (user, col) in columns.iter().enumerate() {
        for step in 0..steps {
            let dst = (step * users + user) * towers;
            let src = step * towers;
            values[dst..dst + towers].copy_from_slice(&col[src..src + towers]);
        }
    }

    debug!(steps, users, towers, seed, "RSSI tensor computed");
    RssiSeries::new(steps, users, towers, values)
}

/// Expected (shadowing-free) RSSI of `tower` at `step` for `user`; used by
/// reports to plot the underlying trend next to the noisy samples.
pub fn mean_rssi_at(
    positions: &PositionSeries,
    layout:    &TowerLayout,
    model:     &PathLossModel,
    step:      Step,
    user:      UserId,
    tower:     TowerId,
) -> Option<f64> {
    let p = positions.get(step, user)?;
    let t = layout.get(tower)?;
    Some(model.mean_rssi_dbm(p.distance_m(t.position)))
}
