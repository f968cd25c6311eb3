//! Simulation time model.
//!
//! Time is a monotonically increasing `Step` counter.  Every step is one
//! snapshot of the RSSI series and one pass of the handover controller.  The
//! mapping to simulated seconds lives in `StepClock`:
//!
//!   elapsed_secs = step * step_duration_secs
//!
//! The mobility generator uses the same duration as its integration interval
//! so positions and decisions stay aligned.

use std::fmt;

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Cast to `usize` for indexing into a snapshot series.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Steps elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Step) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Tracks the current step and converts it to simulated seconds.
#[derive(Clone, Debug)]
pub struct StepClock {
    /// Simulated seconds per step.  Default: 1.0.
    pub step_duration_secs: f64,
    /// The current step, advanced by `StepClock::advance()` each iteration.
    pub current_step: Step,
}

impl StepClock {
    pub fn new(step_duration_secs: f64) -> Self {
        Self {
            step_duration_secs,
            current_step: Step::ZERO,
        }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step = self.current_step + 1;
    }

    /// Simulated seconds elapsed at the start of `step`.
    #[inline]
    pub fn secs_at(&self, step: Step) -> f64 {
        step.0 as f64 * self.step_duration_secs
    }

    /// Simulated seconds elapsed at the current step.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_step)
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_step, self.elapsed_secs())
    }
}
