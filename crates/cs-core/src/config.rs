//! Run configuration for the handover & admission controller.
//!
//! Every field is immutable for the duration of a run.  Call
//! [`HandoverConfig::validate`] (the controller builder does) before using a
//! configuration; invalid values are rejected before any step executes.

use crate::{CoreError, CoreResult};

/// Capacity value meaning "never refuse an admission".
pub const UNLIMITED_CAPACITY: u32 = u32::MAX;

// ── TowerCapacity ─────────────────────────────────────────────────────────────

/// Hard limit on simultaneously connected users per tower.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TowerCapacity {
    /// No admission control.
    Unlimited,
    /// The same limit for every tower.
    Uniform(u32),
    /// One limit per tower, indexed by `TowerId`.
    PerTower(Vec<u32>),
}

impl TowerCapacity {
    /// Expand to one limit per tower.
    ///
    /// `Unlimited` expands to [`UNLIMITED_CAPACITY`].  A `PerTower` list must
    /// have exactly `tower_count` entries.
    pub fn resolve(&self, tower_count: usize) -> CoreResult<Vec<u32>> {
        if tower_count == 0 {
            return Err(CoreError::NoTowers);
        }
        match self {
            TowerCapacity::Unlimited    => Ok(vec![UNLIMITED_CAPACITY; tower_count]),
            TowerCapacity::Uniform(cap) => Ok(vec![*cap; tower_count]),
            TowerCapacity::PerTower(caps) => {
                if caps.len() != tower_count {
                    return Err(CoreError::CapacityCountMismatch {
                        expected: tower_count,
                        got:      caps.len(),
                    });
                }
                Ok(caps.clone())
            }
        }
    }
}

impl Default for TowerCapacity {
    fn default() -> Self {
        TowerCapacity::Uniform(40)
    }
}

// ── HandoverConfig ────────────────────────────────────────────────────────────

/// Control parameters of the handover state machine and the admission gate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HandoverConfig {
    /// A candidate must beat the serving tower by strictly more than this
    /// many dB before it accumulates time-to-trigger credit.  May be
    /// negative.
    pub hysteresis_margin_db: f64,

    /// Consecutive steps a candidate must stay significantly better before
    /// the handover fires.  Must be at least 1.
    pub time_to_trigger_steps: u32,

    /// Receiver floor.  Attachment needs RSSI strictly above it; a serving
    /// tower strictly below it drops the user.
    pub min_sensitivity_dbm: f64,

    /// Per-tower admission limit.
    pub tower_capacity: TowerCapacity,
}

impl Default for HandoverConfig {
    fn default() -> Self {
        Self {
            hysteresis_margin_db:  3.0,
            time_to_trigger_steps: 2,
            min_sensitivity_dbm:   -110.0,
            tower_capacity:        TowerCapacity::default(),
        }
    }
}

impl HandoverConfig {
    /// Reject parameter combinations the controller cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.time_to_trigger_steps == 0 {
            return Err(CoreError::ZeroTimeToTrigger(self.time_to_trigger_steps));
        }
        if !self.hysteresis_margin_db.is_finite() {
            return Err(CoreError::NonFinite {
                name:  "hysteresis_margin_db",
                value: self.hysteresis_margin_db,
            });
        }
        if !self.min_sensitivity_dbm.is_finite() {
            return Err(CoreError::NonFinite {
                name:  "min_sensitivity_dbm",
                value: self.min_sensitivity_dbm,
            });
        }
        Ok(())
    }

    /// Validate and expand the capacity setting for a network of
    /// `tower_count` towers.
    pub fn resolve_capacities(&self, tower_count: usize) -> CoreResult<Vec<u32>> {
        self.validate()?;
        self.tower_capacity.resolve(tower_count)
    }

    /// Copy of `self` with a different hysteresis margin.  Used by
    /// parameter sweeps.
    pub fn with_hysteresis(&self, margin_db: f64) -> Self {
        Self {
            hysteresis_margin_db: margin_db,
            ..self.clone()
        }
    }
}
