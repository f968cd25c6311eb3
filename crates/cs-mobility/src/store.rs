//! Live per-user states and the recorded position series.

use cs_core::{Point, Step, UserId};

use crate::MovementState;

/// Movement state for every user, indexed by `UserId`.
pub struct MobilityStore {
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    pub fn new(states: Vec<MovementState>) -> Self {
        Self { states }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn get(&self, user: UserId) -> Option<&MovementState> {
        self.states.get(user.index())
    }

    /// Current positions of all users in `UserId` order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.states.iter().map(|s| s.position)
    }
}

// ── PositionSeries ────────────────────────────────────────────────────────────

/// Positions of every user at every step, stored step-major:
/// `positions[step * user_count + user]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSeries {
    step_count: usize,
    user_count: usize,
    positions:  Vec<Point>,
}

impl PositionSeries {
    pub(crate) fn with_capacity(step_count: usize, user_count: usize) -> Self {
        Self {
            step_count: 0,
            user_count,
            positions:  Vec::with_capacity(step_count * user_count),
        }
    }

    /// Append one step's worth of positions from the live store.
    pub(crate) fn record(&mut self, store: &MobilityStore) {
        debug_assert_eq!(store.len(), self.user_count);
        self.positions.extend(store.positions());
        self.step_count += 1;
    }

    #[inline]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    #[inline]
    pub fn user_count(&self) -> usize {
        self.user_count
    }

    /// The raw step-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.positions
    }

    /// Position of `user` at `step`, or `None` if out of range.
    pub fn get(&self, step: Step, user: UserId) -> Option<Point> {
        if step.index() >= self.step_count || user.index() >= self.user_count {
            return None;
        }
        Some(self.positions[step.index() * self.user_count + user.index()])
    }

    /// All user positions at `step`.
    pub fn at_step(&self, step: Step) -> Option<&[Point]> {
        if step.index() >= self.step_count {
            return None;
        }
        let start = step.index() * self.user_count;
        Some(&self.positions[start..start + self.user_count])
    }

    /// The trajectory of one user across all recorded steps.
    pub fn track(&self, user: UserId) -> impl Iterator<Item = Point> + '_ {
        let stride = self.user_count.max(1);
        self.positions
            .iter()
            .skip(user.index())
            .step_by(stride)
            .copied()
            .take(if user.index() < self.user_count { self.step_count } else { 0 })
    }
}
