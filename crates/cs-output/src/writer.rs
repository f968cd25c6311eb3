//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ConnectionEventRow, OutputResult, StepSummaryRow, TowerLoadRow};

/// Trait implemented by the CSV, SQLite and Parquet writers.
///
/// When driven by [`MetricsObserver`][crate::MetricsObserver], errors are
/// stored and retrieved with
/// [`take_error`][crate::MetricsObserver::take_error] after the run.
pub trait OutputWriter {
    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Write one step's per-tower loads.
    fn write_tower_loads(&mut self, rows: &[TowerLoadRow]) -> OutputResult<()>;

    /// Write a batch of connection events.
    fn write_events(&mut self, rows: &[ConnectionEventRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.  Writes after `finish` fail with [`OutputError::Finished`][crate::OutputError::Finished].
    fn finish(&mut self) -> OutputResult<()>;
}
