//! `cs-sim` — the handover & admission controller.
//!
//! # Step loop
//!
//! ```text
//! build:  validate config → resolve capacities → validate every snapshot
//! for step in 0..source.step_count():
//!   ① Snapshot  — fetch the step's [user][tower] RSSI matrix.
//!   ② Ledger    — fresh CapacityLedger, every tower at zero.
//!   ③ Users     — for user in 0..U (ascending, sequential):
//!                   evaluate_user(prior, row, &mut ledger, config)
//!                   → new state, handover / drop / slot, event
//!   ④ Record    — StepResult { handovers, dropped, load } appended to the
//!                 MetricsSeries; observers notified.
//! ```
//!
//! Users are never processed in parallel: the ledger makes admission for
//! user *u* depend on users `0..u` of the same step.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Runs [`hysteresis_sweep`] points on Rayon's thread pool. |
//! | `serde`    | Derives serde on the metrics types.                      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_core::HandoverConfig;
//! use cs_sim::{Controller, NoopObserver};
//!
//! let mut controller = Controller::builder(&rssi, HandoverConfig::default()).build()?;
//! let metrics = controller.run(&mut NoopObserver)?;
//! println!("{} handovers", metrics.total_handovers());
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use builder::ControllerBuilder;
pub use controller::Controller;
pub use error::{SimError, SimResult};
pub use metrics::{MetricsAggregator, MetricsSeries, StepResult};
pub use observer::{NoopObserver, StepObserver};
pub use sweep::{SweepPoint, hysteresis_sweep};
