//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `step_summaries.csv`
//! - `tower_loads.csv`
//! - `connection_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ConnectionEventRow, OutputError, OutputResult, StepSummaryRow, TowerLoadRow};

/// Writes metrics to three CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    loads:     Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(["step", "time_secs", "handovers", "dropped", "served"])?;

        let mut loads = Writer::from_path(dir.join("tower_loads.csv"))?;
        loads.write_record(["step", "tower_id", "load", "capacity"])?;

        let mut events = Writer::from_path(dir.join("connection_events.csv"))?;
        events.write_record(["step", "user_id", "kind", "from_tower", "to_tower"])?;

        Ok(Self { summaries, loads, events, finished: false })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished("csv"));
        }
        Ok(())
    }
}

impl OutputWriter for CsvWriter {
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.check_open()?;
        self.summaries.write_record(&[
            row.step.to_string(),
            row.time_secs.to_string(),
            row.handovers.to_string(),
            row.dropped.to_string(),
            row.served.to_string(),
        ])?;
        Ok(())
    }

    fn write_tower_loads(&mut self, rows: &[TowerLoadRow]) -> OutputResult<()> {
        self.check_open()?;
        for row in rows {
            self.loads.write_record(&[
                row.step.to_string(),
                row.tower_id.to_string(),
                row.load.to_string(),
                row.capacity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_events(&mut self, rows: &[ConnectionEventRow]) -> OutputResult<()> {
        self.check_open()?;
        for row in rows {
            self.events.write_record(&[
                row.step.to_string(),
                row.user_id.to_string(),
                row.kind.to_owned(),
                row.from_tower.to_string(),
                row.to_tower.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.loads.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
