//! The per-user, per-step transition function.

use cs_core::{HandoverConfig, TowerId};

use crate::{CapacityLedger, ConnectionEvent, ConnectionState, PendingHandover};

/// What one user adds to the step totals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct StepContribution {
    /// `true` when the user handed over between two distinct towers this
    /// step, including one followed by signal loss.  Initial attaches never
    /// count.
    pub handover: bool,
    /// The tower whose slot the user holds at the end of the step, or `None`
    /// if the user is unserved (counted as dropped).
    pub served_on: Option<TowerId>,
    /// The notable thing that happened, if anything.
    pub event: Option<ConnectionEvent>,
}

impl StepContribution {
    #[inline]
    pub fn dropped(&self) -> bool {
        self.served_on.is_none()
    }
}

/// Index of the strongest tower in `row`; the lowest index wins a tie.
/// `None` for an empty row.
pub fn best_tower(row: &[f64]) -> Option<TowerId> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in row.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| TowerId(i as u32))
}

/// Advance one user by one step.
///
/// `row` is the user's RSSI for this step indexed by `TowerId`; it must have
/// one entry per ledger tower.  On return the ledger holds a slot for the
/// user iff `served_on` is `Some`.
///
/// Order of evaluation:
///
/// 1. An unserved user attaches to the best tower if it is above the
///    sensitivity floor and has room.
/// 2. A connected user debounces a candidate that beats the serving tower by
///    more than the hysteresis margin.  Once the candidate has qualified for
///    `time_to_trigger_steps` consecutive steps the user hands over if the
///    candidate has room, and otherwise keeps its credit.
/// 3. If the tower the user would end on is below the floor the user is
///    dropped.  A handover made this step still counts and is reported as
///    [`ConnectionEvent::HandedOverThenLost`].
/// 4. The user takes its slot.  A user staying put can find its tower
///    already filled by lower-indexed users; it then becomes unserved.
///
/// # Panics
/// Panics if a tower id in `prior` is outside `row`.
pub fn evaluate_user(
    prior:  ConnectionState,
    row:    &[f64],
    ledger: &mut CapacityLedger<'_>,
    config: &HandoverConfig,
) -> (ConnectionState, StepContribution) {
    let Some(best) = best_tower(row) else {
        return (ConnectionState::Unserved, StepContribution::default());
    };
    let floor = config.min_sensitivity_dbm;

    let (serving, pending) = match prior {
        ConnectionState::Unserved => return attach(best, row, ledger, floor),
        ConnectionState::Connected { serving, pending } => (serving, pending),
    };

    // ── Hysteresis and time-to-trigger ────────────────────────────────────
    let mut next = serving;
    let mut next_pending = None;
    let mut event = None;
    if best != serving && row[best.index()] > row[serving.index()] + config.hysteresis_margin_db {
        let count = match pending {
            Some(p) if p.target == best => p.count.saturating_add(1),
            _ => 1,
        };
        if count < config.time_to_trigger_steps {
            next_pending = Some(PendingHandover { target: best, count });
        } else if ledger.has_room(best) {
            next = best;
        } else {
            next_pending = Some(PendingHandover { target: best, count });
            event = Some(ConnectionEvent::HandoverDeferred { from: serving, target: best });
        }
    }

    // ── Signal loss ───────────────────────────────────────────────────────
    //
    // Checked on the tower the user ends on.  A handover made this step
    // still counts, but no slot is taken on the target.
    if row[next.index()] < floor {
        let handover = next != serving;
        let event = if handover {
            ConnectionEvent::HandedOverThenLost { from: serving, to: next }
        } else {
            ConnectionEvent::SignalLost { tower: next }
        };
        let contribution = StepContribution { handover, served_on: None, event: Some(event) };
        return (ConnectionState::Unserved, contribution);
    }

    // ── Commit ────────────────────────────────────────────────────────────
    if !ledger.try_admit(next) {
        // Only reachable when staying put: a handover target was checked above.
        let contribution = StepContribution {
            event: Some(ConnectionEvent::SlotLost { tower: next }),
            ..StepContribution::default()
        };
        return (ConnectionState::Unserved, contribution);
    }

    let handover = next != serving;
    if handover {
        event = Some(ConnectionEvent::HandedOver { from: serving, to: next });
    }
    let state = ConnectionState::Connected { serving: next, pending: next_pending };
    (state, StepContribution { handover, served_on: Some(next), event })
}

/// Initial admission: no hysteresis, no debounce, capacity still applies.
fn attach(
    best:   TowerId,
    row:    &[f64],
    ledger: &mut CapacityLedger<'_>,
    floor:  f64,
) -> (ConnectionState, StepContribution) {
    if row[best.index()] <= floor {
        return (ConnectionState::Unserved, StepContribution::default());
    }
    if ledger.try_admit(best) {
        let contribution = StepContribution {
            handover:  false,
            served_on: Some(best),
            event:     Some(ConnectionEvent::Attached { tower: best }),
        };
        (ConnectionState::connected(best), contribution)
    } else {
        let contribution = StepContribution {
            event: Some(ConnectionEvent::AdmissionRefused { tower: best }),
            ..StepContribution::default()
        };
        (ConnectionState::Unserved, contribution)
    }
}
