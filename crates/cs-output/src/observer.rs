//! `MetricsObserver<W>` — bridges `StepObserver` to an `OutputWriter`.

use cs_core::{Step, UserId};
use cs_handover::ConnectionEvent;
use cs_sim::{MetricsSeries, StepObserver, StepResult};
use tracing::debug;

use crate::row::{ConnectionEventRow, StepSummaryRow, TowerLoadRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`StepObserver`] that writes step summaries, tower loads and connection
/// events to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Events are buffered per step and written in one batch when the step ends.
/// Errors from the writer are stored internally because `StepObserver`
/// methods have no return value.  After `controller.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct MetricsObserver<W: OutputWriter> {
    writer:     W,
    capacity:   Vec<u32>,
    events:     Vec<ConnectionEventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> MetricsObserver<W> {
    /// Create an observer backed by `writer`.  `capacity` is the controller's
    /// resolved per-tower capacity, copied into every load row.
    pub fn new(writer: W, capacity: Vec<u32>) -> Self {
        Self {
            writer,
            capacity,
            events:     Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `controller.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to finish it after a failed run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> StepObserver for MetricsObserver<W> {
    fn on_event(&mut self, step: Step, user: UserId, event: &ConnectionEvent) {
        self.events.push(ConnectionEventRow::new(step, user, event));
    }

    fn on_step_end(&mut self, result: &StepResult) {
        let r = self.writer.write_step_summary(&StepSummaryRow::from(result));
        self.store_err(r);

        let loads: Vec<TowerLoadRow> = result
            .load
            .iter()
            .enumerate()
            .map(|(i, &load)| TowerLoadRow {
                step:     result.step.0,
                tower_id: i as u32,
                load,
                capacity: self.capacity.get(i).copied().unwrap_or(u32::MAX),
            })
            .collect();
        let r = self.writer.write_tower_loads(&loads);
        self.store_err(r);

        if !self.events.is_empty() {
            let r = self.writer.write_events(&self.events);
            self.events.clear();
            self.store_err(r);
        }
    }

    fn on_run_end(&mut self, metrics: &MetricsSeries) {
        let r = self.writer.finish();
        self.store_err(r);
        debug!(steps = metrics.len(), "metrics output finished");
    }
}
