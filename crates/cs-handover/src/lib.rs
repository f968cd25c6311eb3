//! `cs-handover` — the per-user half of the handover & admission controller.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`state`]      | `ConnectionState`, `PendingHandover`                         |
//! | [`ledger`]     | `CapacityLedger` — step-scoped per-tower admission counter   |
//! | [`event`]      | `ConnectionEvent` — what happened to one user in one step    |
//! | [`transition`] | `best_tower`, `evaluate_user`, `StepContribution`            |
//!
//! # Design notes
//!
//! A step of the controller in cs-sim works as follows:
//!
//! 1. Create a fresh [`CapacityLedger`] with every tower at zero.
//! 2. For every user in ascending index order, call [`evaluate_user`] with
//!    the user's prior state, its RSSI row for this step and the ledger.
//!    The function returns the new state and the user's contribution to the
//!    step totals; the ledger records the slot the user ends up holding.
//! 3. Drop the ledger; its final counts are the step's tower loads.
//!
//! Because the ledger is shared across users within a step, a user's
//! admission can depend on the fate of every lower-indexed user.  That
//! first-come-first-served order is part of the observable behaviour.
//!
//! Nothing here allocates per call or reads global state, so the transition
//! can be driven directly from tests with hand-written rows.

pub mod event;
pub mod ledger;
pub mod state;
pub mod transition;


pub use event::ConnectionEvent;
pub use ledger::CapacityLedger;
pub use state::{ConnectionState, PendingHandover};
pub use transition::{StepContribution, best_tower, evaluate_user};
