//! `cs-output` — metrics writers for the rust_cellsim workspace.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                                          |
//! |-----------|---------|------------------------------------------------------------------------|
//! | *(none)*  | CSV     | `step_summaries.csv`, `tower_loads.csv`, `connection_events.csv`       |
//! | `sqlite`  | SQLite  | `output.db`                                                            |
//! | `parquet` | Parquet | `step_summaries.parquet`, `tower_loads.parquet`, `connection_events.parquet` |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`MetricsObserver`], which implements `cs_sim::StepObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, MetricsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = MetricsObserver::new(writer, controller.capacity().to_vec());
//! controller.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::MetricsObserver;
pub use row::{ConnectionEventRow, NO_TOWER, StepSummaryRow, TowerLoadRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
