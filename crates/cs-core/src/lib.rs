//! `cs-core` — foundational types for the `rust_cellsim` workspace.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `UserId`, `TowerId`                                   |
//! | [`geo`]         | `Point` (planar metres), `Area`                       |
//! | [`time`]        | `Step`, `StepClock`                                   |
//! | [`rng`]         | `UserRng` (per-user), `SimRng` (global)               |
//! | [`config`]      | `HandoverConfig`, `TowerCapacity`                     |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{HandoverConfig, TowerCapacity, UNLIMITED_CAPACITY};
pub use error::{CoreError, CoreResult};
pub use geo::{Area, Point};
pub use ids::{TowerId, UserId};
pub use rng::{SimRng, UserRng};
pub use time::{Step, StepClock};
