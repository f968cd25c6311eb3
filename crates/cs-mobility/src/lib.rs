//! `cs-mobility` — user movement for the cellular simulation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`params`]  | `MobilityParams` — Gauss–Markov tuning and service area           |
//! | [`state`]   | `MovementState` — per-user position, speed and heading            |
//! | [`store`]   | `MobilityStore` (live states), `PositionSeries` (recorded output) |
//! | [`engine`]  | `MobilityEngine` — seeded initialisation and per-step update      |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model (Gauss–Markov)
//!
//! Speed and heading are both first-order autoregressive processes pulled
//! towards a mean:
//!
//! ```text
//! s' = α·s + (1-α)·s̄ + √(1-α²)·N(0, σ_s)
//! θ' = α·θ + (1-α)·θ̄ + √(1-α²)·N(0, σ_θ)
//! p' = p + s'·(cos θ', sin θ')·dt
//! ```
//!
//! `α = 1` gives straight-line constant-velocity motion, `α = 0` a memoryless
//! random walk.  Users bounce off the edges of the square service area.
//!
//! The handover controller never sees positions: `cs-signal` turns a
//! [`PositionSeries`] into RSSI values first.

pub mod engine;
pub mod error;
pub mod params;
pub mod state;
pub mod store;


pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
pub use params::MobilityParams;
pub use state::MovementState;
pub use store::{MobilityStore, PositionSeries};
