//! Plain data row types written by output backends.

use cs_core::{Step, UserId};
use cs_handover::ConnectionEvent;
use cs_sim::StepResult;

/// Tower column value meaning "no tower" (unserved side of an event).
pub const NO_TOWER: u32 = u32::MAX;

/// Totals for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:      u64,
    pub time_secs: f64,
    pub handovers: u32,
    pub dropped:   u32,
    pub served:    u32,
}

impl From<&StepResult> for StepSummaryRow {
    fn from(r: &StepResult) -> Self {
        Self {
            step:      r.step.0,
            time_secs: r.time_secs,
            handovers: r.handovers,
            dropped:   r.dropped,
            served:    r.served(),
        }
    }
}

/// Load of one tower at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerLoadRow {
    pub step:     u64,
    pub tower_id: u32,
    pub load:     u32,
    /// Configured capacity; `u32::MAX` when unlimited.
    pub capacity: u32,
}

/// One connection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionEventRow {
    pub step:       u64,
    pub user_id:    u32,
    /// [`ConnectionEvent::kind`] label.
    pub kind:       &'static str,
    /// Tower the user was on at the start of the step; [`NO_TOWER`] if it
    /// was unserved.
    pub from_tower: u32,
    /// Tower the user moved to or asked for; [`NO_TOWER`] if the event
    /// names none.
    pub to_tower:   u32,
}

impl ConnectionEventRow {
    pub fn new(step: Step, user: UserId, event: &ConnectionEvent) -> Self {
        let (from, to) = event.towers();
        Self {
            step:       step.0,
            user_id:    user.0,
            kind:       event.kind(),
            from_tower: from.map_or(NO_TOWER, |t| t.0),
            to_tower:   to.map_or(NO_TOWER, |t| t.0),
        }
    }
}
