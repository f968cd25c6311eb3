//! Connection events — what happened to a user during one step.

use cs_core::TowerId;

/// A notable change in one user's connection during one step.
///
/// Events are informational: the controller forwards them to observers and
/// derives ping-pong statistics from them, but decisions never depend on
/// past events.  At most one event is produced per user per step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ConnectionEvent {
    /// An unserved user attached to `tower`.
    Attached { tower: TowerId },

    /// A connected user moved from `from` to `to`.  Counts as a handover.
    HandedOver { from: TowerId, to: TowerId },

    /// The debounce threshold was reached but `target` was full.  The user
    /// stays on `from`, keeps its credit and retries next step.
    HandoverDeferred { from: TowerId, target: TowerId },

    /// The serving tower was below the sensitivity floor; the user is now
    /// unserved.
    SignalLost { tower: TowerId },

    /// A connected user handed over from `from` to `to`, but `to` was below
    /// the sensitivity floor, so the user is now unserved.  Counts as a
    /// handover; no slot is taken on `to`.
    HandedOverThenLost { from: TowerId, to: TowerId },

    /// An unserved user could receive `tower` but it was full.
    AdmissionRefused { tower: TowerId },

    /// A user staying on `tower` found every slot taken by lower-indexed
    /// users and lost its connection.
    SlotLost { tower: TowerId },
}

impl ConnectionEvent {
    /// Short lowercase label, used as the `kind` column in output tables.
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionEvent::Attached { .. } => "attached",
            ConnectionEvent::HandedOver { .. } => "handed_over",
            ConnectionEvent::HandoverDeferred { .. } => "handover_deferred",
            ConnectionEvent::SignalLost { .. } => "signal_lost",
            ConnectionEvent::HandedOverThenLost { .. } => "handed_over_then_lost",
            ConnectionEvent::AdmissionRefused { .. } => "admission_refused",
            ConnectionEvent::SlotLost { .. } => "slot_lost",
        }
    }

    /// `(from, to)` of the tower change this event describes.  `from` is
    /// `None` when the user started the step unserved; `to` is `None` when
    /// the event names no destination tower.
    pub fn towers(&self) -> (Option<TowerId>, Option<TowerId>) {
        match *self {
            ConnectionEvent::Attached { tower } => (None, Some(tower)),
            ConnectionEvent::HandedOver { from, to } => (Some(from), Some(to)),
            ConnectionEvent::HandoverDeferred { from, target } => (Some(from), Some(target)),
            ConnectionEvent::SignalLost { tower } => (Some(tower), None),
            ConnectionEvent::HandedOverThenLost { from, to } => (Some(from), Some(to)),
            ConnectionEvent::AdmissionRefused { tower } => (None, Some(tower)),
            ConnectionEvent::SlotLost { tower } => (Some(tower), None),
        }
    }

    /// `(from, to)` if this event counts as a handover.
    pub fn handover(&self) -> Option<(TowerId, TowerId)> {
        match *self {
            ConnectionEvent::HandedOver { from, to }
            | ConnectionEvent::HandedOverThenLost { from, to } => Some((from, to)),
            _ => None,
        }
    }
}
