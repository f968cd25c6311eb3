//! Per-user connection state.

use cs_core::TowerId;

/// A handover candidate that has been significantly better than the serving
/// tower for `count` consecutive steps.
///
/// `count` is always at least 1: a candidate that stops qualifying is
/// discarded, not decremented.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingHandover {
    pub target: TowerId,
    pub count:  u32,
}

/// Where a user stands at the end of a step.
///
/// Only a connected user can carry a pending handover, so "a debounce count
/// without a target" and "a pending target while unserved" cannot be
/// represented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConnectionState {
    /// Not attached to any tower.  Every user starts here.
    #[default]
    Unserved,

    /// Attached to `serving`, possibly debouncing a move to another tower.
    Connected {
        serving: TowerId,
        pending: Option<PendingHandover>,
    },
}

impl ConnectionState {
    /// Connected to `tower` with nothing pending.
    #[inline]
    pub fn connected(tower: TowerId) -> Self {
        ConnectionState::Connected { serving: tower, pending: None }
    }

    /// The serving tower, if any.
    #[inline]
    pub fn serving(&self) -> Option<TowerId> {
        match self {
            ConnectionState::Unserved => None,
            ConnectionState::Connected { serving, .. } => Some(*serving),
        }
    }

    #[inline]
    pub fn is_served(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    #[inline]
    pub fn pending(&self) -> Option<PendingHandover> {
        match self {
            ConnectionState::Unserved => None,
            ConnectionState::Connected { pending, .. } => *pending,
        }
    }

    /// Consecutive qualifying steps of the pending candidate; 0 when none.
    #[inline]
    pub fn debounce_count(&self) -> u32 {
        self.pending().map_or(0, |p| p.count)
    }
}
