//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `step_summaries.parquet`
//! - `tower_loads.parquet`
//! - `connection_events.parquet`
//!
//! Step summaries are buffered and written as one batch by `finish()`; loads
//! and events are written one batch per call.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{ConnectionEventRow, OutputError, OutputResult, StepSummaryRow, TowerLoadRow};

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("step",      DataType::UInt64,  false),
        Field::new("time_secs", DataType::Float64, false),
        Field::new("handovers", DataType::UInt32,  false),
        Field::new("dropped",   DataType::UInt32,  false),
        Field::new("served",    DataType::UInt32,  false),
    ]))
}

fn load_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("step",     DataType::UInt64, false),
        Field::new("tower_id", DataType::UInt32, false),
        Field::new("load",     DataType::UInt32, false),
        Field::new("capacity", DataType::UInt32, false),
    ]))
}

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("step",       DataType::UInt64, false),
        Field::new("user_id",    DataType::UInt32, false),
        Field::new("kind",       DataType::Utf8,   false),
        Field::new("from_tower", DataType::UInt32, false),
        Field::new("to_tower",   DataType::UInt32, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let file = File::create(dir.join(name))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// Writes metrics to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    summaries:      Option<ArrowWriter<File>>,
    loads:          Option<ArrowWriter<File>>,
    events:         Option<ArrowWriter<File>>,
    summary_schema: Arc<Schema>,
    load_schema:    Arc<Schema>,
    event_schema:   Arc<Schema>,
    pending:        Vec<StepSummaryRow>,
}

impl ParquetWriter {
    /// Create the three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let summary_schema = summary_schema();
        let load_schema    = load_schema();
        let event_schema   = event_schema();

        Ok(Self {
            summaries: Some(open(dir, "step_summaries.parquet", &summary_schema)?),
            loads:     Some(open(dir, "tower_loads.parquet", &load_schema)?),
            events:    Some(open(dir, "connection_events.parquet", &event_schema)?),
            summary_schema,
            load_schema,
            event_schema,
            pending:   Vec::new(),
        })
    }

    fn flush_summaries(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.summaries.as_mut() else {
            return Err(OutputError::Finished("parquet"));
        };

        let mut steps     = UInt64Builder::new();
        let mut times     = Float64Builder::new();
        let mut handovers = UInt32Builder::new();
        let mut dropped   = UInt32Builder::new();
        let mut served    = UInt32Builder::new();

        for row in self.pending.drain(..) {
            steps.append_value(row.step);
            times.append_value(row.time_secs);
            handovers.append_value(row.handovers);
            dropped.append_value(row.dropped);
            served.append_value(row.served);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summary_schema),
            vec![
                Arc::new(steps.finish()),
                Arc::new(times.finish()),
                Arc::new(handovers.finish()),
                Arc::new(dropped.finish()),
                Arc::new(served.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl OutputWriter for ParquetWriter {
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        if self.summaries.is_none() {
            return Err(OutputError::Finished("parquet"));
        }
        self.pending.push(*row);
        Ok(())
    }

    fn write_tower_loads(&mut self, rows: &[TowerLoadRow]) -> OutputResult<()> {
        let Some(writer) = self.loads.as_mut() else {
            return Err(OutputError::Finished("parquet"));
        };
        if rows.is_empty() {
            return Ok(());
        }

        let mut steps      = UInt64Builder::new();
        let mut towers     = UInt32Builder::new();
        let mut loads      = UInt32Builder::new();
        let mut capacities = UInt32Builder::new();

        for row in rows {
            steps.append_value(row.step);
            towers.append_value(row.tower_id);
            loads.append_value(row.load);
            capacities.append_value(row.capacity);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.load_schema),
            vec![
                Arc::new(steps.finish()),
                Arc::new(towers.finish()),
                Arc::new(loads.finish()),
                Arc::new(capacities.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[ConnectionEventRow]) -> OutputResult<()> {
        let Some(writer) = self.events.as_mut() else {
            return Err(OutputError::Finished("parquet"));
        };
        if rows.is_empty() {
            return Ok(());
        }

        let mut steps = UInt64Builder::new();
        let mut users = UInt32Builder::new();
        let mut kinds = StringBuilder::new();
        let mut froms = UInt32Builder::new();
        let mut tos   = UInt32Builder::new();

        for row in rows {
            steps.append_value(row.step);
            users.append_value(row.user_id);
            kinds.append_value(row.kind);
            froms.append_value(row.from_tower);
            tos.append_value(row.to_tower);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.event_schema),
            vec![
                Arc::new(steps.finish()),
                Arc::new(users.finish()),
                Arc::new(kinds.finish()),
                Arc::new(froms.finish()),
                Arc::new(tos.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.summaries.is_some() {
            self.flush_summaries()?;
        }
        for slot in [&mut self.summaries, &mut self.loads, &mut self.events] {
            if let Some(w) = slot.take() {
                w.close()?;
            }
        }
        Ok(())
    }
}
