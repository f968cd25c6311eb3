//! CSV measurement loader.
//!
//! # CSV format
//!
//! Long format, one row per sample, rows in any order:
//!
//! ```csv
//! step,user,tower,rssi_dbm
//! 0,0,0,-71.5
//! 0,0,1,-88.0
//! 0,1,0,-93.2
//! 0,1,1,-79.9
//! 1,0,0,-70.8
//! ```
//!
//! The tensor shape is the largest index seen on each axis plus one.  Every
//! cell of that shape must appear exactly once; gaps, duplicates and
//! non-finite values are errors that name the offending cell.  A shape whose
//! cell count overflows `usize` is rejected before anything is allocated.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use cs_core::{Step, TowerId, UserId};

use crate::{RssiSeries, SignalError, SignalResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RssiRecord {
    step:     u32,
    user:     u32,
    tower:    u32,
    rssi_dbm: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an [`RssiSeries`] from a CSV file.
pub fn load_rssi_csv(path: &Path) -> SignalResult<RssiSeries> {
    let file = std::fs::File::open(path).map_err(SignalError::Io)?;
    let series = load_rssi_reader(file)?;
    info!(
        path = %path.display(),
        samples = series.values().len(),
        "measurement file loaded"
    );
    Ok(series)
}

/// Like [`load_rssi_csv`] but accepts any `Read` source.
pub fn load_rssi_reader<R: Read>(reader: R) -> SignalResult<RssiSeries> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records: Vec<RssiRecord> = Vec::new();
    for result in csv_reader.deserialize::<RssiRecord>() {
        let row = result.map_err(|e| SignalError::Parse(e.to_string()))?;
        if !row.rssi_dbm.is_finite() {
            return Err(SignalError::NonFinite {
                step:  Step(row.step as u64),
                user:  UserId(row.user),
                tower: TowerId(row.tower),
                value: row.rssi_dbm,
            });
        }
        records.push(row);
    }

    if records.is_empty() {
        return RssiSeries::new(0, 0, 0, Vec::new());
    }

    // ── Infer the shape ───────────────────────────────────────────────────
    let steps  = records.iter().map(|r| r.step).max().map_or(0, |m| m as usize + 1);
    let users  = records.iter().map(|r| r.user).max().map_or(0, |m| m as usize + 1);
    let towers = records.iter().map(|r| r.tower).max().map_or(0, |m| m as usize + 1);

    let total = steps
        .checked_mul(users)
        .and_then(|n| n.checked_mul(towers))
        .ok_or(SignalError::ShapeOverflow { steps, users, towers })?;

    // ── Walk the samples in tensor order ──────────────────────────────────
    //
    // Sorting by flat index finds gaps and duplicates without a dense
    // buffer, so a stray huge index costs no more memory than the input.
    let index = |r: &RssiRecord| (r.step as usize * users + r.user as usize) * towers + r.tower as usize;
    records.sort_by_key(|r| index(r));

    let mut values = Vec::with_capacity(records.len().min(total));
    for r in &records {
        let i = index(r);
        if i < values.len() {
            return Err(SignalError::DuplicateSample {
                step:  Step(r.step as u64),
                user:  UserId(r.user),
                tower: TowerId(r.tower),
            });
        }
        if i > values.len() {
            return Err(missing(values.len(), users, towers));
        }
        values.push(r.rssi_dbm);
    }
    if values.len() < total {
        return Err(missing(values.len(), users, towers));
    }

    RssiSeries::new(steps, users, towers, values)
}

/// The cell at flat index `i` of a `[step][user][tower]` tensor.
fn missing(i: usize, users: usize, towers: usize) -> SignalError {
    let per_step = users * towers;
    SignalError::MissingSample {
        step:  Step((i / per_step) as u64),
        user:  UserId(((i % per_step) / towers) as u32),
        tower: TowerId((i % towers) as u32),
    }
}
