//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `step_summaries`, `tower_loads` and `connection_events`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ConnectionEventRow, OutputError, OutputResult, StepSummaryRow, TowerLoadRow};

/// Writes metrics to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS step_summaries (
                 step      INTEGER PRIMARY KEY,
                 time_secs REAL    NOT NULL,
                 handovers INTEGER NOT NULL,
                 dropped   INTEGER NOT NULL,
                 served    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tower_loads (
                 step     INTEGER NOT NULL,
                 tower_id INTEGER NOT NULL,
                 load     INTEGER NOT NULL,
                 capacity INTEGER NOT NULL,
                 PRIMARY KEY (step, tower_id)
             );
             CREATE TABLE IF NOT EXISTS connection_events (
                 step       INTEGER NOT NULL,
                 user_id    INTEGER NOT NULL,
                 kind       TEXT    NOT NULL,
                 from_tower INTEGER NOT NULL,
                 to_tower   INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished("sqlite"));
        }
        Ok(())
    }
}

impl OutputWriter for SqliteWriter {
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.check_open()?;
        self.conn.execute(
            "INSERT INTO step_summaries (step, time_secs, handovers, dropped, served) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.step, row.time_secs, row.handovers, row.dropped, row.served],
        )?;
        Ok(())
    }

    fn write_tower_loads(&mut self, rows: &[TowerLoadRow]) -> OutputResult<()> {
        self.check_open()?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO tower_loads (step, tower_id, load, capacity) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.step, row.tower_id, row.load, row.capacity])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[ConnectionEventRow]) -> OutputResult<()> {
        self.check_open()?;
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO connection_events (step, user_id, kind, from_tower, to_tower) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.step,
                    row.user_id,
                    row.kind,
                    row.from_tower,
                    row.to_tower,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
