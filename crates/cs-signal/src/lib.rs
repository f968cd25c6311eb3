//! `cs-signal` — everything between user positions and the handover
//! controller.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`tower`]       | `Tower`, `TowerSite`, `TowerLayout`                           |
//! | [`propagation`] | `PathLossModel`, `compute_rssi` (log-distance + shadowing)    |
//! | [`series`]      | `RssiSeries` — dense `[step][user][tower]` tensor             |
//! | [`snapshot`]    | `SignalSnapshot`, the `SignalSource` trait                    |
//! | [`loader`]      | CSV measurement loader                                        |
//! | [`error`]       | `SignalError`, `SignalResult<T>`                              |
//!
//! # Data flow
//!
//! ```text
//! PositionSeries ──compute_rssi──▶ RssiSeries ──SignalSource──▶ controller
//!                   measurements.csv ──load_rssi_csv──┘
//! ```
//!
//! The controller only sees [`SignalSource`]; anything that can produce a
//! validated [`SignalSnapshot`] for a step index can drive it.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Computes shadowing per user on Rayon's thread pool.    |
//! | `serde`    | Derives serde on `PathLossModel` and `TowerSite`.      |

pub mod error;
pub mod loader;
pub mod propagation;
pub mod series;
pub mod snapshot;
pub mod tower;


pub use error::{SignalError, SignalResult};
pub use loader::{load_rssi_csv, load_rssi_reader};
pub use propagation::{PathLossModel, compute_rssi, mean_rssi_at};
pub use series::RssiSeries;
pub use snapshot::{SignalSnapshot, SignalSource};
pub use tower::{Tower, TowerLayout, TowerSite};
